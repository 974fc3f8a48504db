fn main() {
    if let Err(e) = ryzen_tuner::core::Client::run() {
        eprintln!("ryzen_tuner failed: {}", e);
        std::process::exit(1);
    }
}
