use taglog::{Config, ConfigError, Level, Logger, args};

fn main() -> Result<(), ConfigError> {
    let config = Config::from_toml(
        r#"
[console]
color = true

[file]
outpath = "logs/{tag}"

[levels]
debug = false
"#,
    )?
    .on_print(|level, line, stack| {
        if level == Level::Error {
            eprintln!("alert: {line} (from {}:{})", stack.addr, stack.row);
        }
    });

    let root = Logger::with_tag_and_config("app", config);
    root.info(&args!["service starting", serde_json::json!({"port": 8080})]);
    root.debug(&args!["this line is filtered out"]);

    let db = root.derive("db");
    db.warn(&args!["pool nearly exhausted", 9, "of", 10]);

    let migrations = db.derive("migrate");
    migrations.error(&args!["checksum mismatch on", "0007_indexes.sql"]);

    println!("info lines so far: {}", root.count(Level::Info));
    Ok(())
}
