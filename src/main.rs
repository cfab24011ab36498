fn main() {
    pkgagent::run_cli();
}
