use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = blind_rsa::cli::run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
