use crate::exit_codes;
use anyhow::Result;
use scoresheet_core::criteria::CATALOG;

pub fn run() -> Result<i32> {
    println!("{:<4} {:<32} {:>9}  {}", "No.", "Criterion", "Weightage", "Description");
    for c in &CATALOG {
        println!(
            "{:<4} {:<32} {:>8.0}%  {}",
            c.id,
            c.name,
            c.weight * 100.0,
            c.description
        );
    }
    println!();
    println!("Each criterion is scored 0-10; weighted score = score x weight x 10.");
    println!("Total possible score: 100 points.");
    Ok(exit_codes::SUCCESS)
}
