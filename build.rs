use std::time::{SystemTime, UNIX_EPOCH};

/// Station credentials baked into the ConfigUpdate join path. Missing
/// values are emitted empty; the firmware then goes straight to the
/// access-point fallback.
const CREDENTIAL_VARS: [&str; 2] = ["RELAY_WIFI_SSID", "RELAY_WIFI_PASSWORD"];

fn main() {
    println!("cargo:rerun-if-changed=.env");

    // A missing .env is normal on CI; real environment variables still win.
    let _ = dotenvy::dotenv();

    for var in CREDENTIAL_VARS {
        println!("cargo:rerun-if-env-changed={var}");
        let value = std::env::var(var).unwrap_or_default();
        println!("cargo:rustc-env={var}={value}");
    }

    let built_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    println!("cargo:rustc-env=RELAY_BUILD_TIMESTAMP={built_at}");

    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }
}
