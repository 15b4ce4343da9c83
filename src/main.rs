fn main() -> anyhow::Result<()> {
    pdf_copilot_lib::run()
}
