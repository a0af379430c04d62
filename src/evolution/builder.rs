use crate::{
    breeding::{CrossoverOperator, MutationOperator},
    error::{MelodyError, Result},
    fitness::FitnessEvaluator,
    selection::SelectionStrategy,
};

use super::EvolutionEngine;

/// Assembles an [`EvolutionEngine`] from its components.
///
/// ```rust
/// use genmelody::breeding::{SinglePointCrossover, ToggleMutation};
/// use genmelody::evolution::EvolutionEngineBuilder;
/// use genmelody::fitness::{FitnessWeights, MelodyFitness};
/// use genmelody::selection::RouletteWheelSelection;
///
/// let engine = EvolutionEngineBuilder::new()
///     .with_evaluator(MelodyFitness::new(FitnessWeights {
///         harmony: 1.0,
///         ..FitnessWeights::default()
///     }))
///     .with_selection(RouletteWheelSelection::new())
///     .with_crossover(SinglePointCrossover)
///     .with_mutation(ToggleMutation)
///     .build()
///     .unwrap();
///
/// assert_eq!(engine.evaluator().weights().harmony, 1.0);
/// ```
pub struct EvolutionEngineBuilder<F, S, C, M>
where
    F: FitnessEvaluator,
    S: SelectionStrategy,
    C: CrossoverOperator,
    M: MutationOperator,
{
    evaluator: Option<F>,
    selection: Option<S>,
    crossover: Option<C>,
    mutation: Option<M>,
}

impl<F, S, C, M> EvolutionEngineBuilder<F, S, C, M>
where
    F: FitnessEvaluator,
    S: SelectionStrategy,
    C: CrossoverOperator,
    M: MutationOperator,
{
    pub fn new() -> Self {
        Self {
            evaluator: None,
            selection: None,
            crossover: None,
            mutation: None,
        }
    }

    pub fn with_evaluator(mut self, evaluator: F) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    pub fn with_selection(mut self, selection: S) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn with_crossover(mut self, crossover: C) -> Self {
        self.crossover = Some(crossover);
        self
    }

    pub fn with_mutation(mut self, mutation: M) -> Self {
        self.mutation = Some(mutation);
        self
    }

    pub fn build(self) -> Result<EvolutionEngine<F, S, C, M>> {
        let evaluator = self.evaluator.ok_or_else(|| {
            MelodyError::Configuration("Fitness evaluator not specified".to_string())
        })?;

        let selection = self.selection.ok_or_else(|| {
            MelodyError::Configuration("Selection strategy not specified".to_string())
        })?;

        let crossover = self.crossover.ok_or_else(|| {
            MelodyError::Configuration("Crossover operator not specified".to_string())
        })?;

        let mutation = self.mutation.ok_or_else(|| {
            MelodyError::Configuration("Mutation operator not specified".to_string())
        })?;

        Ok(EvolutionEngine::new(evaluator, selection, crossover, mutation))
    }
}

impl<F, S, C, M> Default for EvolutionEngineBuilder<F, S, C, M>
where
    F: FitnessEvaluator,
    S: SelectionStrategy,
    C: CrossoverOperator,
    M: MutationOperator,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breeding::{SinglePointCrossover, ToggleMutation};
    use crate::fitness::MelodyFitness;
    use crate::selection::RouletteWheelSelection;

    type Builder = EvolutionEngineBuilder<
        MelodyFitness,
        RouletteWheelSelection,
        SinglePointCrossover,
        ToggleMutation,
    >;

    #[test]
    fn test_missing_component_is_a_configuration_error() {
        let result = Builder::new()
            .with_evaluator(MelodyFitness::default())
            .with_selection(RouletteWheelSelection::new())
            .with_crossover(SinglePointCrossover)
            .build();

        match result {
            Err(MelodyError::Configuration(msg)) => assert!(msg.contains("Mutation")),
            _ => panic!("Expected Configuration error"),
        }
    }

    #[test]
    fn test_complete_builder() {
        assert!(Builder::default()
            .with_evaluator(MelodyFitness::default())
            .with_selection(RouletteWheelSelection::new())
            .with_crossover(SinglePointCrossover)
            .with_mutation(ToggleMutation)
            .build()
            .is_ok());
    }
}
