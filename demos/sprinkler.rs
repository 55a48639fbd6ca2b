//! The wet grass network: clouds (C) bring rain (R) and keep the sprinkler (S) off; either one
//! wets the grass (W).

#[macro_use]
extern crate tally;

use tally::{print_table, FactorBuilder, NetworkBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let net = NetworkBuilder::new()
        .with_factor("P_Cloudy", FactorBuilder::new().with_binary("C").build_from_table(vec![ 0.5, 0.5 ])?)
        .with_factor(
            "CP_Sprinkler",
            FactorBuilder::new()
                .with_binary("C")
                .with_binary("S")
                .build_from_table(vec![ 0.1, 0.9, 0.5, 0.5 ])?
        )
        .with_factor(
            "CP_Rain",
            FactorBuilder::new()
                .with_binary("C")
                .with_binary("R")
                .build_from_table(vec![ 0.8, 0.2, 0.2, 0.8 ])?
        )
        .with_factor(
            "CP_WetGrass",
            FactorBuilder::new()
                .with_binary("S")
                .with_binary("R")
                .with_binary("W")
                .build_with(|a| {
                    let p = match (a["S"] == true, a["R"] == true) {
                        (true, true) => 0.99,
                        (true, false) | (false, true) => 0.9,
                        (false, false) => 0.0
                    };
                    if a["W"] == true { p } else { 1.0 - p }
                })?
        )
        .build()?;

    println!("P(W)\n");
    print_table(&net.query("W", &assignment!{})?);

    println!("\nP(S, R | W = true)\n");
    print_table(&net.query(vec!["S", "R"], &assignment!{ "W" => true })?);

    println!("\nP(S | W = true, R = true)\n");
    print_table(&net.query("S", &assignment!{ "W" => true, "R" => true })?);

    Ok(())
}
