fn main() {
    if let Err(e) = carewatch_lib::run() {
        eprintln!("carewatch: {e}");
        std::process::exit(1);
    }
}
