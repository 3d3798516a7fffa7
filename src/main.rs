fn main() {
    std::process::exit(cam_sentry_lib::run());
}
