fn main() {
    if let Err(err) = jsonmend::cli::run() {
        eprintln!("jsonmend: {err}");
        std::process::exit(1);
    }
}
