// src/banner.rs

/// Prints the application startup banner to the console.
pub fn print_banner() {
    let banner = r#"
                                  _   _
  ___   __ _  _ __    __ _   ___ (_)| |_  _   _
 / __| / _` || '_ \  / _` | / __|| || __|| | | |
| (__ | (_| || |_) || (_| || (__ | || |_ | |_| |
 \___| \__,_|| .__/  \__,_| \___||_| \__| \__, |
             |_|                          |___/

    SSE Scotland Capacity Dashboard
"#;
    println!("{}", banner);
}
