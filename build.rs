use std::env;
use std::fs;
use std::path::Path;

// Variables que el widget lee con option_env! (ver src/config.rs)
const SCANNER_KEYS: &[&str] = &[
    "SCANNER_URL",
    "SCANNER_READY_TIMEOUT_MS",
    "SCANNER_ORIGIN",
    "STRICT_ORIGIN",
    "ENABLE_LOGGING",
    "TOAST_DURATION_MS",
    "TIMEOUT_TOAST_DURATION_MS",
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env");
    for key in SCANNER_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    let env_file = Path::new(".env");
    let contents = match fs::read_to_string(env_file) {
        Ok(contents) => contents,
        Err(_) => {
            println!("cargo:warning=Sin archivo .env: el scanner usa la configuración por defecto.");
            return;
        }
    };

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim().trim_matches('"');

        if !SCANNER_KEYS.contains(&key) {
            println!("cargo:warning=Clave desconocida en .env ignorada: {}", key);
            continue;
        }

        // El entorno real tiene prioridad sobre .env
        if env::var(key).is_err() {
            println!("cargo:rustc-env={}={}", key, value);
        }
    }
}
