fn main() {
    acrux::cli::run();
}
