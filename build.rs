use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Exporta las variables de .env como variables de compilación (option_env!)
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                // Ignorar comentarios y líneas vacías
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim();

                    // El entorno real tiene prioridad sobre .env
                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                }
            }
        }
    } else {
        println!("cargo:warning=No hay archivo .env, se usan los valores por defecto de config.rs");
    }

    println!("cargo:rerun-if-changed=build.rs");
}
