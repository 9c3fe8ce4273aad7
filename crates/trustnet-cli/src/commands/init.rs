// crates/trustnet-cli/src/commands/init.rs
//
// `trustnet init`: create the vote store and seed the default categories.

use trustnet_store::seed_default_categories;

use super::Context;

/// Run the init command. Safe to repeat; existing categories are kept.
pub fn run(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let store = ctx.open_store()?;
    let added = seed_default_categories(&store)?;

    println!("Trustnet store ready at {}", ctx.config.data_path().display());
    if added == 0 {
        println!("  Default categories already present.");
    } else {
        println!("  Added {} default categories.", added);
    }
    println!();
    println!("Next: `trustnet categories list` or `trustnet vote --from 1 --to 2`.");

    Ok(())
}
