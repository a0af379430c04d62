use rayon::prelude::*;
use tracing::{debug, info, info_span};

use super::builder::EvolutionEngineBuilder;
use super::options::{EvolutionOptions, LogLevel, ELITE_COUNT};
use crate::{
    breeding::{CrossoverOperator, MutationOperator, SinglePointCrossover, ToggleMutation},
    error::{MelodyError, OptionExt, Result},
    fitness::{FitnessEvaluator, MelodyFitness},
    genome::Genome,
    music::Scale,
    rng::RandomNumberGenerator,
    selection::{RouletteWheelSelection, SelectionStrategy},
};

/// A genome together with its fitness score.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionResult {
    /// The evolved genome.
    pub genome: Genome,
    /// The fitness score of the genome.
    pub score: f64,
}

/// The engine with the stock melody components.
pub type MelodyEngine =
    EvolutionEngine<MelodyFitness, RouletteWheelSelection, SinglePointCrossover, ToggleMutation>;

/// Evolves a population of melodies for a fixed number of generations.
///
/// Every generation the population is scored and ranked, the two best
/// genomes are copied unchanged, and the rest of the next generation is bred
/// pairwise: select two parents, cross them over, mutate both children.
#[derive(Debug, Clone)]
pub struct EvolutionEngine<F, S, C, M>
where
    F: FitnessEvaluator,
    S: SelectionStrategy,
    C: CrossoverOperator,
    M: MutationOperator,
{
    evaluator: F,
    selection: S,
    crossover: C,
    mutation: M,
}

impl Default for MelodyEngine {
    fn default() -> Self {
        Self::new(
            MelodyFitness::default(),
            RouletteWheelSelection::default(),
            SinglePointCrossover,
            ToggleMutation,
        )
    }
}

impl<F, S, C, M> EvolutionEngine<F, S, C, M>
where
    F: FitnessEvaluator,
    S: SelectionStrategy,
    C: CrossoverOperator,
    M: MutationOperator,
{
    /// Creates a new `EvolutionEngine` from its four components.
    pub fn new(evaluator: F, selection: S, crossover: C, mutation: M) -> Self {
        Self {
            evaluator,
            selection,
            crossover,
            mutation,
        }
    }

    /// Returns a builder for assembling an engine component by component.
    pub fn builder() -> EvolutionEngineBuilder<F, S, C, M> {
        EvolutionEngineBuilder::new()
    }

    pub fn evaluator(&self) -> &F {
        &self.evaluator
    }

    /// Builds the first generation, every cell drawn uniformly from `scale`.
    pub fn initialize(
        &self,
        options: &EvolutionOptions,
        scale: &Scale,
        rng: &mut RandomNumberGenerator,
    ) -> Vec<Genome> {
        (0..options.get_population_size())
            .map(|_| Genome::random(options.get_shape(), scale, rng))
            .collect()
    }

    /// Scores every genome and sorts the population best first.
    ///
    /// # Errors
    ///
    /// Returns `MelodyError::FitnessCalculation` if any score is not finite.
    pub fn rank(
        &self,
        population: Vec<Genome>,
        options: &EvolutionOptions,
    ) -> Result<Vec<EvolutionResult>> {
        let score_one = |genome: Genome| -> Result<EvolutionResult> {
            let score = self.evaluator.evaluate(&genome);
            if !score.is_finite() {
                return Err(MelodyError::FitnessCalculation(format!(
                    "Non-finite fitness score encountered: {}",
                    score
                )));
            }
            Ok(EvolutionResult { genome, score })
        };

        let mut ranked: Vec<EvolutionResult> =
            if population.len() >= options.get_parallel_threshold() {
                population.into_par_iter().map(score_one).collect::<Result<_>>()?
            } else {
                population.into_iter().map(score_one).collect::<Result<_>>()?
            };

        // Scores are finite, so partial_cmp always succeeds. sort_by is
        // stable, which keeps ties in their incoming order.
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(ranked)
    }

    /// Breeds the generation that replaces `ranked`.
    ///
    /// `ranked` must be sorted best first, as returned by [`Self::rank`].
    pub fn next_generation(
        &self,
        ranked: &[EvolutionResult],
        options: &EvolutionOptions,
        scale: &Scale,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Genome>> {
        if ranked.len() < ELITE_COUNT {
            return Err(MelodyError::EmptyPopulation);
        }

        let population: Vec<Genome> = ranked.iter().map(|r| r.genome.clone()).collect();
        let fitness: Vec<f64> = ranked.iter().map(|r| r.score).collect();

        let mut next = Vec::with_capacity(options.get_population_size());
        next.extend(population.iter().take(ELITE_COUNT).cloned());

        for _ in 0..options.pairs_per_generation() {
            let (parent_a, parent_b) = self.selection.select(&population, &fitness, rng)?;
            let (mut child_a, mut child_b) = self.crossover.crossover(parent_a, parent_b, rng)?;
            self.mutation
                .mutate(&mut child_a, options.get_mutation_rate(), scale, rng);
            self.mutation
                .mutate(&mut child_b, options.get_mutation_rate(), scale, rng);
            next.push(child_a);
            next.push(child_b);
        }

        Ok(next)
    }

    /// Initializes a random population from `scale` and evolves it.
    ///
    /// # Returns
    ///
    /// The final population with scores, best first.
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// - The options fail validation
    /// - Selection, crossover or fitness evaluation fails in any generation
    pub fn run(
        &self,
        options: &EvolutionOptions,
        scale: &Scale,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<EvolutionResult>> {
        options.validate()?;
        let population = self.initialize(options, scale, rng);
        self.evolve(options, population, scale, rng)
    }

    /// Evolves an existing population for `options.get_num_generations()` generations.
    ///
    /// # Errors
    ///
    /// Besides the errors of [`Self::run`], fails with
    /// `MelodyError::Configuration` if the population does not match the
    /// configured size and shape.
    pub fn evolve(
        &self,
        options: &EvolutionOptions,
        population: Vec<Genome>,
        scale: &Scale,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<EvolutionResult>> {
        options.validate()?;

        if population.len() != options.get_population_size() {
            return Err(MelodyError::Configuration(format!(
                "Population has {} genomes but the options expect {}",
                population.len(),
                options.get_population_size()
            )));
        }
        if let Some(odd) = population
            .iter()
            .find(|g| g.shape() != options.get_shape())
        {
            return Err(MelodyError::Configuration(format!(
                "Genome shape {}x{} does not match the configured {}x{}",
                odd.shape().bars,
                odd.shape().notes_per_bar,
                options.get_shape().bars,
                options.get_shape().notes_per_bar
            )));
        }
        if let Some(index) = population.iter().position(|g| !g.is_within(scale)) {
            return Err(MelodyError::Configuration(format!(
                "Genome {} holds pitches outside the scale rooted at {}",
                index,
                scale.root()
            )));
        }

        let span = info_span!(
            "evolve",
            population = options.get_population_size(),
            generations = options.get_num_generations()
        );
        let _guard = span.enter();

        let mut population = population;
        for generation in 0..options.get_num_generations() {
            let ranked = self.rank(population, options)?;
            log_generation(generation, &ranked, options.get_log_level());

            population = self
                .next_generation(&ranked, options, scale, rng)
                .map_err(|e| match e {
                    MelodyError::Sampling(msg) => MelodyError::Sampling(format!(
                        "generation {}: {}",
                        generation, msg
                    )),
                    other => other,
                })?;
        }

        let ranked = self.rank(population, options)?;
        let best = ranked.first().ok_or_else_melody(|| {
            MelodyError::Evolution("Evolution completed without any genomes".to_string())
        })?;
        info!(best_score = best.score, "evolution finished");

        Ok(ranked)
    }
}

fn log_generation(generation: usize, ranked: &[EvolutionResult], log_level: &LogLevel) {
    match log_level {
        LogLevel::None => {}
        LogLevel::Minimal | LogLevel::Verbose => {
            if let Some(best) = ranked.first() {
                info!(generation, best_score = best.score, "generation ranked");
            }
            if matches!(log_level, LogLevel::Verbose) {
                for (rank, result) in ranked.iter().enumerate() {
                    debug!(
                        generation,
                        rank,
                        score = result.score,
                        rests = result.genome.rest_count(),
                        "individual"
                    );
                }
            }
        }
    }
}
