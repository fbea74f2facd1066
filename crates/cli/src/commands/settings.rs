use aliasctl_core::config::detect_current_shell;
use aliasctl_core::dialect::Dialect;
use aliasctl_core::error::Result;
use itertools::Itertools;

use super::Context;
use crate::output::print_entries;

pub fn set_shell(context: &mut Context, shell: &str) -> Result<()> {
    let dialect: Dialect = shell.parse()?;

    context.config.shell = dialect;
    context.save_config()?;

    println!("Shell set to {dialect}");
    Ok(())
}

pub fn set_file(context: &mut Context, path: &str) -> Result<()> {
    context.config.alias_file = path.to_string();
    context.save_config()?;

    println!("Alias file set to `{path}`");
    Ok(())
}

pub fn detect_shell(context: &mut Context) -> Result<()> {
    let (dialect, alias_file) = detect_current_shell();

    context.config.shell = dialect;
    context.config.alias_file = alias_file;
    context.save_config()?;

    println!(
        "Detected shell {dialect} with alias file `{}`",
        context.config.alias_file
    );
    Ok(())
}

pub fn shells(context: &Context) -> Result<()> {
    let names = Dialect::ALL.iter().map(|dialect| dialect.name()).collect_vec();
    print_entries(
        "Supported shells:",
        names,
        Some(context.dialect.name()),
        "active",
    )
}
