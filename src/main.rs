fn main() {
    sat_playground_lib::run();
}
