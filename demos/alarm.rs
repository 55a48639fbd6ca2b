//! Inference by enumeration on the burglary alarm network.
//!
//! A thief (D) or a storm (S) can set off the alarm (A), which the security service (W) reports.
//! A storm is announced on the radio (R).

#[macro_use]
extern crate tally;

use tally::{print_table, FactorBuilder, NetworkBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    /////////////////////////////////////////////////////
    // Step 1: Build the network, parents first
    let p_thief = FactorBuilder::new()
        .with_binary("D")
        .build_from_table(vec![ 0.001, 0.999 ])?;
    let p_storm = FactorBuilder::new()
        .with_binary("S")
        .build_from_table(vec![ 0.01, 0.99 ])?;
    let cp_radio = FactorBuilder::new()
        .with_binary("S")
        .with_binary("R")
        .build_with(|a| if a["R"] == a["S"] { 0.9 } else { 0.1 })?;
    let cp_alarm = FactorBuilder::new()
        .with_binary("D")
        .with_binary("S")
        .with_binary("A")
        .build_from_table(vec![ 0.95, 0.05, 0.9, 0.1, 0.5, 0.5, 0.01, 0.99 ])?;
    let cp_service = FactorBuilder::new()
        .with_binary("A")
        .with_binary("W")
        .build_with(|a| if a["W"] == a["A"] { 0.9 } else { 0.1 })?;

    let net = NetworkBuilder::new()
        .with_factor("P_Thief", p_thief)
        .with_factor("P_Storm", p_storm)
        .with_factor("CP_Radio", cp_radio)
        .with_factor("CP_Alarm", cp_alarm)
        .with_factor("CP_Service", cp_service)
        .build()?;

    /////////////////////////////////////////////////////
    // Step 2: The chain rule, step by step
    let p_storm = net.factor("P_Storm").ok_or("no factor P_Storm")?;
    let cp_radio = net.factor("CP_Radio").ok_or("no factor CP_Radio")?;
    let p_sr = p_storm.joint(cp_radio)?;
    println!("P(S, R)\n");
    print_table(&p_sr);

    println!("\nP(R)\n");
    print_table(&p_sr.marginal("R")?);

    println!("\nP(S | R = true)\n");
    print_table(&p_sr.observe(&assignment!{ "R" => true })?);

    /////////////////////////////////////////////////////
    // Step 3: Queries against the full joint
    println!("\nP(D | W = true)\n");
    print_table(&net.query("D", &assignment!{ "W" => true })?);

    println!("\nP(D | W = true, R = true)\n");
    print_table(&net.query("D", &assignment!{ "W" => true, "R" => true })?);

    let (mpe, p) = net.most_probable(&assignment!{ "W" => true })?;
    println!("\nmost probable explanation of W = true: {} ({:.4})", mpe, p);

    Ok(())
}
