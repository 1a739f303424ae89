fn main() -> std::process::ExitCode {
    review_insights_lib::run()
}
