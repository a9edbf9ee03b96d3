//! Tile table listing command implementation.

use super::CliError;
use tilecheck::TileRegistry;

/// Execute the tiles command.
///
/// # Errors
///
/// Never fails; the signature matches the other commands.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn execute() -> Result<(), CliError> {
    print!("{}", format_table(&TileRegistry::standard()));
    Ok(())
}

fn format_table(registry: &TileRegistry) -> String {
    let mut output = String::from("  ID  NAME                CATEGORY  SOLID  SLOW  SHADOW\n");
    for (id, props) in registry.iter() {
        let name = registry.name(id).unwrap_or("?");
        let category = registry
            .category(id)
            .map_or_else(|| "?".to_string(), |c| c.to_string());
        output.push_str(&format!(
            "  {id:>2}  {name:<18}  {category:<8}  {:<5}  {:<4}  {}\n",
            mark(props.solid),
            mark(props.slow),
            mark(props.shadow)
        ));
    }
    output
}

const fn mark(flag: bool) -> &'static str {
    if flag { "yes" } else { "-" }
}
