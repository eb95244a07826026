fn main() -> anyhow::Result<()> {
    keystroke_logger_lib::run()
}
