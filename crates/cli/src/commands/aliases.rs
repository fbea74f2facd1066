use std::path::Path;

use aliasctl_core::alias_store::{validate_alias_command, validate_alias_name};
use aliasctl_core::config::expand_path;
use aliasctl_core::dialect::Dialect;
use aliasctl_core::error::Result;
use aliasctl_core::export::export as export_aliases;
use aliasctl_core::managed_block;
use aliasctl_core::translation::Translator;
use log::info;

use super::Context;
use crate::output::print_aliases;

pub fn add(context: &mut Context, name: &str, command: &str) -> Result<()> {
    validate_alias_name(name)?;
    validate_alias_command(name, command)?;

    context.store.add(name, command, context.dialect);
    context.store.save()?;

    println!("Added {} alias: {name} = {command}", context.dialect);
    Ok(())
}

pub fn remove(context: &mut Context, name: &str) -> Result<()> {
    if !context.store.remove(name) {
        return Err(context.not_found(name));
    }

    context.store.save()?;
    println!("Removed alias `{name}`");
    Ok(())
}

pub fn list(context: &Context) -> Result<()> {
    print_aliases(context.dialect, &context.store.list(context.dialect))
}

pub fn apply(context: &Context) -> Result<()> {
    let path = context.config.alias_file_path();
    let written = managed_block::apply(&context.store, context.dialect, &path)?;

    println!("Applied {written} aliases to `{}`", path.display());
    println!("Restart your shell or source the file to use them.");
    Ok(())
}

pub fn import(context: &mut Context) -> Result<()> {
    let path = context.config.alias_file_path();
    let found = managed_block::import(&mut context.store, context.dialect, &path)?;
    context.store.save()?;

    println!("Imported {found} aliases from `{}`", path.display());
    Ok(())
}

pub fn export(context: &Context, shell: &str, file: &str) -> Result<()> {
    let target: Dialect = shell.parse()?;
    let path = expand_path(file);

    let translator = if context.config.has_provider() && target.syntax() != context.dialect.syntax() {
        Some(context.translator(None)?)
    } else {
        info!("Exporting without AI translation");
        None
    };

    let written = export_aliases(
        &context.store,
        context.dialect,
        target,
        Path::new(&path),
        translator.as_ref().map(|translator| translator as &dyn Translator),
    )?;

    println!("Exported {written} aliases for {target} to `{path}`");
    Ok(())
}
