use std::collections::HashMap;
use weightedlist::{WeightPolicy, WeightedEnum, WeightedList, WeightedListBuilder};

#[derive(Copy, Eq, PartialEq, Clone, Debug, Hash, WeightedEnum)]
enum Rarity {
    #[weight(1)]
    Mythic,
    #[weight(10)]
    Legendary,
    #[weight(200)]
    Uncommon,
    #[weight(500)]
    Common,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut table = Rarity::weighted_list(1, 0xC0FFEE);
    let mut hist: HashMap<Rarity, u64> = HashMap::default();

    // Save the cursor so the run can be replayed.
    let snapshot = table.random_state();
    for _ in 0..200_000 {
        if let Some(r) = table.sample_owned() {
            *hist.entry(r).or_default() += 1;
        }
    }

    let mut values: Vec<(Rarity, u64)> = hist.into_iter().collect();
    values.sort_by(|(_, ca), (_, cb)| cb.cmp(ca));
    for (rarity, count) in values {
        println!("{count: >6} {rarity:?}");
    }

    table.restore_random_state(snapshot);
    println!("replayed first draw: {:?}", table.sample());

    // Boost legendaries for an event, then decay everything.
    table.set_weight(&Rarity::Legendary, 100)?;
    table.subtract_weight_from_all(50)?;
    println!("{table:?}");

    // Strict tables refuse nonsense weights instead of patching them.
    let mut strict: WeightedList<&str> = WeightedListBuilder::new()
        .policy(WeightPolicy::RejectOnAdd)
        .seed(2, 2)
        .build_from([("sword", 1), ("shield", 3)])?;
    if let Err(e) = strict.add("cursed ring", 0) {
        println!("rejected: {e}");
    }
    println!("{strict}");

    Ok(())
}
