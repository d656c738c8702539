#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

#[cfg(target_os = "windows")]
fn main() {
    if let Err(e) = langbeacon::platform::windows::app::run() {
        eprintln!("LangLayoutBeacon error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_os = "windows"))]
fn main() {
    eprintln!("LangLayoutBeacon only runs on Windows.");
    std::process::exit(1);
}
