fn main() {
    geoinunda_frontend::main();
}
