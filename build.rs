use std::fs;

fn main() {
    // Validate default config at compile time
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");

    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {}", e),
    };

    // The renderer needs a positive width to wrap against
    let width = table
        .get("layout")
        .and_then(|layout| layout.get("max_width"))
        .and_then(|width| width.as_integer());
    match width {
        Some(width) if width > 0 => {}
        other => panic!("default_config.toml: layout.max_width must be positive, got {:?}", other),
    }
}
