use std::io::Write;

use anyhow::Context;

use banksys_infra::BankConfig;

fn main() -> anyhow::Result<()> {
    let config = BankConfig::from_env().context("invalid configuration")?;
    banksys_observability::init(config.log_format);

    let statement = banksys_cli::run().context("demonstration scenario failed")?;
    let rendered = statement
        .render(config.output)
        .context("failed to render statement")?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    if !rendered.ends_with('\n') {
        writeln!(stdout)?;
    }

    tracing::debug!(output = ?config.output, "statement written");
    Ok(())
}
