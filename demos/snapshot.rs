use generic_sync_map::{ternary, SyncMap};
use std::collections::BTreeMap;

fn main() {
    let inventory = SyncMap::<String, u32>::new();
    inventory.set("apples".to_string(), 12);
    inventory.set("pears".to_string(), 0);
    inventory.set("plums".to_string(), 7);

    // Take a private copy before the next round of updates
    let before: BTreeMap<_, _> = inventory.to_map().into_iter().collect();

    inventory.set("pears".to_string(), 30);
    inventory.delete("plums");

    println!("Before restock:");
    for (item, count) in &before {
        println!("  {:<8} {:>3} {}", item, count, ternary::choose(*count == 0, "(sold out)", ""));
    }

    println!("After restock:");
    let mut after: Vec<(String, u32)> = inventory.iter().collect();
    after.sort();
    for (item, count) in after {
        println!("  {:<8} {:>3}", item, count);
    }

    let (plums, found) = inventory.get_or_zero("plums");
    println!("plums: {} ({})", plums, ternary::choose(found, "stocked", "no longer carried"));
}
