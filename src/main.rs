fn main() {
    if let Err(error) = registration_io::run_cli() {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
