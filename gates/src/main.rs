use evogate::lessons::{LessonSet, LogicOp};
use evogate::networks::{Predictor, SigmoidNetwork, ThresholdNetwork};
use evogate::populations::logging::{EvolutionLogger, ReportingLevel};
use evogate::{GeneticConfig, PopulationConfig, Trainer};

use std::fs::File;
use std::io::Write;
use std::num::NonZeroUsize;

fn main() {
    let population_config = PopulationConfig {
        size: NonZeroUsize::new(100).unwrap(),
        generations: 1000,
        mutation_interval: NonZeroUsize::new(20).unwrap(),
    };

    // The threshold perceptron on both gates, as in the
    // interactive original.
    for op in [LogicOp::And, LogicOp::Or] {
        let report = match op {
            LogicOp::And => "report_and.txt",
            LogicOp::Or => "report_or.txt",
        };
        if let Err(e) = run(ThresholdNetwork::new(1.5), op, &population_config, report) {
            eprintln!("{}", e);
        }
    }

    // The layered sigmoid model on AND: 2 hidden layers of 5
    // units, one gene per connection.
    let sigmoid = SigmoidNetwork::new(2, NonZeroUsize::new(5).unwrap());
    if let Err(e) = run(
        sigmoid,
        LogicOp::And,
        &population_config,
        "report_and_sigmoid.txt",
    ) {
        eprintln!("{}", e);
    }
}

fn run<P: Predictor>(
    predictor: P,
    op: LogicOp,
    population_config: &PopulationConfig,
    report_name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let genetic_config = GeneticConfig {
        gene_count: NonZeroUsize::new(predictor.gene_count()).unwrap(),
        mutation_step: 0.1,
        infection_chance: 0.2,
    };

    let mut trainer = Trainer::new(
        predictor,
        LessonSet::new(op),
        population_config.clone(),
        genetic_config,
    )?;

    let mut logger = EvolutionLogger::new(ReportingLevel::AllMembers);
    trainer.train(&mut logger);

    let mut report = File::create(report_name)?;
    for log in logger.iter() {
        writeln!(report, "{}", log)?;
    }

    let champion = trainer
        .population()
        .champion()
        .expect("trained population has a champion");
    println!(
        "{:?}: champion missed {} of {} lessons after {} generations: {}",
        op,
        champion.fitness().unwrap(),
        trainer.lessons().len(),
        trainer.generation(),
        ron::to_string(champion)?,
    );
    println!("full run written to {}", report_name);

    Ok(())
}
