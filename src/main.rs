fn main() {
    bubble_climb::game::run();
}
