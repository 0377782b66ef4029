use std::path::PathBuf;

use anyhow::Context;
use log::{error, info};
use step_tracker::report;
use step_tracker::utils::generate_sample_data;
use step_tracker::{
    CsvStorage, Individual, MembershipRegistry, RankingEngine, TrackerConfig, write_snapshot,
};

/// Write the registry back to the CSV files after a mutation
fn persist(storage: &CsvStorage, registry: &MembershipRegistry) -> anyhow::Result<()> {
    storage
        .save(registry)
        .with_context(|| format!("Failed to save data to {}", storage.individuals_path().display()))
}

fn main() -> anyhow::Result<()> {
    let data_dir = std::env::args().nth(1).map_or_else(|| PathBuf::from("."), PathBuf::from);
    let config = TrackerConfig::default().with_data_dir(&data_dir);

    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_filter.as_str()))
        .init();
    info!("{config}");

    let storage = CsvStorage::from_config(&config);
    generate_sample_data(&storage, config.sample_individuals).context("Failed to generate sample data")?;

    let mut registry = storage.load().context("Failed to load data")?;
    let engine = RankingEngine::new(config.ranking.clone());

    println!("\n--- Initial State ---");
    println!("Individuals in tree: {}", registry.individual_count());
    println!("Groups in tree: {}", registry.group_count());

    println!("\n--- Testing Add_Person ---");
    let new_people = [
        Individual::new(21, "NewUser", 28, 5500, [5000, 5600, 5400, 5700, 5300, 5800, 5900]),
        Individual::new(22, "AnotherUser", 35, 6000, [5500, 5800, 5900, 5700, 5600, 5900, 6100]),
        Individual::new(21, "DuplicateUser", 20, 4000, [100, 200, 300, 400, 500, 600, 700]),
    ];
    for person in new_people {
        let (id, name) = (person.id, person.name.clone());
        match registry.add_individual(person) {
            Ok(()) => {
                persist(&storage, &registry)?;
                println!("Individual {name} (ID: {id}) added successfully.");
            }
            Err(e) => println!("Error: {e}"),
        }
    }

    println!("\n--- Testing Create_group ---");
    let requests: [(&str, &str, &[u32], u64); 3] = [
        ("G6", "New Explorers", &[16, 17], 20_000),
        ("G7", "Mixed Group", &[1, 18], 15_000),
        ("G8", "Too Many", &[19, 20, 21, 22, 1, 2], 40_000),
    ];
    for (group_id, name, members, goal) in requests {
        match registry.create_group(group_id, name, members, goal) {
            Ok(group) => {
                println!("Group '{name}' (ID: {group_id}) created successfully: {group}");
                persist(&storage, &registry)?;
            }
            Err(e) => println!("Error: {e}"),
        }
    }

    report::print_top_achievers(&engine.top_daily_achievers(&registry, engine.config().top_n));

    println!("\n--- Testing Check_group_achievement ---");
    for group_id in ["G1", "G5"] {
        match engine.check_group_achievement(&registry, group_id) {
            Ok(achievement) => report::print_group_achievement(&achievement),
            Err(e) => println!("Error: {e}"),
        }
    }
    engine.refresh_group_totals(&mut registry);
    persist(&storage, &registry)?;

    report::print_leaderboard(&engine.leaderboard(&registry, registry.groups()));

    println!("\n--- Testing Check_individual_rewards ---");
    for individual_id in [3, 6, 15] {
        match engine.reward_if_top_n(&mut registry, individual_id) {
            Ok(outcome) => {
                if let Some(individual) = registry.lookup_individual(individual_id) {
                    report::print_reward(individual, &outcome);
                }
                persist(&storage, &registry)?;
            }
            Err(e) => println!("Error: {e}"),
        }
    }

    println!("\n--- Testing Delete_individual ---");
    match registry.delete_individual(1) {
        Ok(()) => persist(&storage, &registry)?,
        Err(e) => println!("Error: {e}"),
    }
    match registry.lookup_individual(1) {
        Some(individual) => println!("User 1 after deletion: {individual}"),
        None => println!("User 1 after deletion: Not found"),
    }
    match registry.lookup_group("G1") {
        Some(group) => println!("Group G1 after User 1 deletion: {group}"),
        None => println!("Group G1 not found"),
    }

    println!("\n--- Testing Delete_group ---");
    match registry.delete_group("G5") {
        Ok(()) => persist(&storage, &registry)?,
        Err(e) => println!("Error: {e}"),
    }
    if let Some(individual) = registry.lookup_individual(15) {
        println!("User 15 after G5 deletion: {individual}");
    }

    println!("\n--- Testing Merge_groups ---");
    match registry.merge_groups("G3", "G4", "Merged Titans", 50_000) {
        Ok(group) => {
            println!("Groups merged into {group}");
            persist(&storage, &registry)?;
        }
        Err(e) => {
            error!("Merge failed: {e}");
            println!("Error: {e}");
        }
    }
    println!(
        "Old G4 after merge: {}",
        registry
            .lookup_group("G4")
            .map_or_else(|| "Not found".to_string(), ToString::to_string)
    );
    for individual_id in [10, 13] {
        if let Some(individual) = registry.lookup_individual(individual_id) {
            println!(
                "User {individual_id} group_id after merge: {}",
                individual.current_group_id().unwrap_or("None")
            );
        }
    }

    report::print_group_range("G1", "G6", &engine.group_range_report(&registry, "G1", "G6"));

    println!("\n--- Testing Suggest_goal_update ---");
    for individual_id in [3, 19, 10, 100] {
        match engine.suggest_goal_update(&registry, individual_id) {
            Ok(suggestion) => {
                if let Some(individual) = registry.lookup_individual(individual_id) {
                    report::print_suggestion(individual, &suggestion);
                }
            }
            Err(e) => println!("Error: {e}"),
        }
    }

    println!("\n--- Final State ---");
    println!("Individuals in tree: {}", registry.individual_count());
    println!("Groups in tree: {}", registry.group_count());

    registry
        .check_invariants()
        .context("Membership rules broken at exit")?;
    write_snapshot(&registry, &config.snapshot_path()).context("Failed to write snapshot")?;

    Ok(())
}
