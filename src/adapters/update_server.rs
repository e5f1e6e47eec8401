//! Firmware update web surface (ConfigUpdate mode).
//!
//! | Route          | Purpose                                         |
//! |----------------|-------------------------------------------------|
//! | `GET /`        | Info page: firmware version + build timestamp   |
//! | `GET /update`  | Upload form                                     |
//! | `POST /update` | Raw firmware image body → OTA partition, reboot |
//!
//! Page rendering and the upload streaming loop are target-independent;
//! only the HTTP server binding is cfg-gated to ESP-IDF.

use log::info;

use super::ota::{OtaError, OtaManager};

/// Firmware version reported on the info page.
pub const FIRMWARE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Unix seconds at which this image was built (set by `build.rs`).
pub const BUILD_TIMESTAMP: &str = env!("RELAY_BUILD_TIMESTAMP");

const UPLOAD_CHUNK: usize = 1024;

const STYLE: &str = "body{font-family:sans-serif;max-width:640px;margin:40px auto;padding:0 16px}\
.info{background:#e3f2fd;padding:12px;border-radius:4px;margin:16px 0}";

pub fn render_info_page(version: &str, built_at: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"UTF-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\
<title>ESP-NOW Relay</title><style>{STYLE}</style></head><body>\
<h1>ESP-NOW Relay</h1>\
<div class=\"info\">Firmware version: {version} (built {built_at})</div>\
<div class=\"info\">Upload new firmware at <a href=\"/update\">/update</a>.</div>\
</body></html>"
    )
}

pub fn render_upload_page() -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"UTF-8\">\
<title>ESP-NOW Relay Update</title><style>{STYLE}</style></head><body>\
<h1>Firmware upload</h1>\
<input type=\"file\" id=\"fw\" accept=\".bin\"> <button onclick=\"up()\">Upload</button>\
<p id=\"st\"></p>\
<script>function up(){{const f=document.getElementById('fw').files[0];if(!f)return;\
const s=document.getElementById('st');s.textContent='Uploading...';\
fetch('/update',{{method:'POST',body:f}}).then(r=>r.text()).then(t=>s.textContent=t)\
.catch(e=>s.textContent='Upload failed: '+e);}}</script>\
</body></html>"
    )
}

/// Pump an image of `expected` bytes from `read_chunk` into `ota` and
/// finalize it.  `read_chunk` returns 0 at end of body.  On any error the
/// session is aborted before returning.
pub fn stream_image(
    ota: &mut OtaManager,
    expected: u32,
    mut read_chunk: impl FnMut(&mut [u8]) -> Result<usize, OtaError>,
) -> Result<u32, OtaError> {
    let result = (|| -> Result<u32, OtaError> {
        ota.begin(expected)?;
        let mut buf = [0u8; UPLOAD_CHUNK];
        let mut written = 0;
        loop {
            let n = read_chunk(&mut buf)?;
            if n == 0 {
                break;
            }
            written = ota.write(&buf[..n])?;
        }
        ota.finalize()?;
        Ok(written)
    })();

    if result.is_err() {
        ota.abort();
    } else {
        info!("Update: {} byte image accepted", expected);
    }
    result
}

// ───────────────────────────────────────────────────────────────
// ESP-IDF HTTP binding
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub use server::UpdateServer;

#[cfg(target_os = "espidf")]
mod server {
    use esp_idf_svc::http::server::{Configuration, EspHttpServer};
    use esp_idf_svc::http::{Headers, Method};
    use esp_idf_svc::io::{Read, Write};
    use log::{info, warn};

    use super::{render_info_page, render_upload_page, stream_image, BUILD_TIMESTAMP, FIRMWARE_VERSION};
    use crate::adapters::ota::{OtaError, OtaManager};

    /// Running HTTP server; dropping it stops the server.
    pub struct UpdateServer {
        _server: EspHttpServer<'static>,
    }

    impl UpdateServer {
        pub fn start(port: u16) -> anyhow::Result<Self> {
            let mut server = EspHttpServer::new(&Configuration {
                http_port: port,
                ..Default::default()
            })?;

            server.fn_handler("/", Method::Get, |req| -> anyhow::Result<()> {
                let page = render_info_page(FIRMWARE_VERSION, BUILD_TIMESTAMP);
                req.into_ok_response()?.write_all(page.as_bytes())?;
                Ok(())
            })?;

            server.fn_handler("/update", Method::Get, |req| -> anyhow::Result<()> {
                req.into_ok_response()?.write_all(render_upload_page().as_bytes())?;
                Ok(())
            })?;

            server.fn_handler("/update", Method::Post, |mut req| -> anyhow::Result<()> {
                let expected = req.content_len().unwrap_or(0) as u32;
                let mut ota = OtaManager::new();
                let outcome = stream_image(&mut ota, expected, |buf| {
                    req.read(buf).map_err(|e| {
                        warn!("Update: body read failed: {:?}", e);
                        OtaError::ReceiveFailed
                    })
                });

                match outcome {
                    Ok(_) => {
                        req.into_ok_response()?.write_all(b"Update OK, rebooting")?;
                        ota.reboot();
                    }
                    Err(e) => {
                        warn!("Update: rejected ({})", e);
                        let body = format!("Update failed: {e}");
                        req.into_status_response(400)?.write_all(body.as_bytes())?;
                        Ok(())
                    }
                }
            })?;

            info!("Update server listening on port {}", port);
            Ok(Self { _server: server })
        }
    }
}
