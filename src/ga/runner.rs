//! Generational GA loop.
//!
//! [`GeneticEngine`] owns the population and drives each generation in
//! strict phase order: selection → crossover (whole batch) → mutation
//! (whole batch) → elitist replacement.

use super::config::GaConfig;
use super::error::GaError;
use super::types::{fitness_from_cost, Chromosome, GeneticOperators, Individual, Problem, State};
use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Generic GA engine over a [`Problem`] and a set of [`GeneticOperators`].
///
/// # Usage
///
/// ```
/// use u_permga::ga::{GaConfig, GeneticEngine, PermutationGa};
/// use u_permga::problems::NQueens;
///
/// let config = GaConfig::default().with_population_size(30).with_seed(42);
/// let ops = PermutationGa::new(0.1).unwrap();
/// let mut engine = GeneticEngine::new(NQueens::new(6), ops, config).unwrap();
/// let state = engine.search(10).unwrap();
/// assert_eq!(state.len(), 6);
/// ```
pub struct GeneticEngine<P: Problem, O> {
    problem: P,
    operators: O,
    config: GaConfig,
    population: Vec<Individual<P::Gene>>,
    chromosome_len: usize,
    generation: usize,
    fitness_history: Vec<f64>,
    rng: StdRng,
}

impl<P, O> GeneticEngine<P, O>
where
    P: Problem,
    O: GeneticOperators<P::Gene>,
{
    /// Builds the initial population from `population_size` independent
    /// random states.
    ///
    /// Fails with [`GaError::InvalidConfig`] when the population is empty
    /// or smaller than the operators require, and with
    /// [`GaError::LengthMismatch`] when the problem produces states of
    /// different lengths.
    pub fn new(problem: P, operators: O, config: GaConfig) -> Result<Self, GaError> {
        config.validate()?;
        let min = operators.min_population();
        if config.population_size < min {
            return Err(GaError::InvalidConfig(format!(
                "population_size {} is below the operators' minimum of {min}",
                config.population_size
            )));
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let chromosomes: Vec<Chromosome<P::Gene>> = (0..config.population_size)
            .map(|_| operators.encode(problem.random_state(&mut rng)))
            .collect();
        let chromosome_len = chromosomes[0].len();
        for c in &chromosomes {
            check_len(chromosome_len, c)?;
        }

        let population = evaluate(&problem, &operators, chromosomes, config.parallel)?;

        let mut engine = Self {
            problem,
            operators,
            config,
            population,
            chromosome_len,
            generation: 0,
            fitness_history: Vec::new(),
            rng,
        };
        let best = engine.best_fitness();
        engine.fitness_history.push(best);
        tracing::debug!(
            population_size = engine.config.population_size,
            chromosome_len,
            best_fitness = best,
            "initial population created"
        );
        Ok(engine)
    }

    /// Runs `generations` generations and returns the fittest state of the
    /// final population.
    pub fn search(&mut self, generations: usize) -> Result<State<P::Gene>, GaError> {
        tracing::info!(
            generations,
            population_size = self.config.population_size,
            "starting search"
        );
        for _ in 0..generations {
            self.step()?;
        }
        let best = self.best();
        tracing::info!(
            generation = self.generation,
            best_fitness = best.fitness,
            best_cost = best.cost(),
            "search finished"
        );
        Ok(self.operators.decode(&best.chromosome))
    }

    /// Advances the population by exactly one generation.
    pub fn step(&mut self) -> Result<(), GaError> {
        let pairs = self.select()?;
        let mut children = self.crossover(&pairs)?;
        self.mutate(&mut children)?;
        self.replace(children)?;

        self.generation += 1;
        let best = self.best_fitness();
        self.fitness_history.push(best);
        tracing::debug!(
            generation = self.generation,
            best_fitness = best,
            best_cost = 1.0 / best - 1.0,
            "generation complete"
        );
        Ok(())
    }

    /// Asks the operators for one mating pair per population slot.
    pub fn select(&mut self) -> Result<Vec<(usize, usize)>, GaError> {
        let pairs = self.operators.select(&self.population, &mut self.rng)?;
        if pairs.len() != self.population.len() {
            return Err(GaError::SelectionCount {
                expected: self.population.len(),
                found: pairs.len(),
            });
        }
        Ok(pairs)
    }

    /// Produces one child per mating pair.
    pub fn crossover(
        &mut self,
        pairs: &[(usize, usize)],
    ) -> Result<Vec<Chromosome<P::Gene>>, GaError> {
        let n = self.population.len();
        let mut children = Vec::with_capacity(pairs.len());
        for &(i, j) in pairs {
            if i >= n || j >= n {
                return Err(GaError::PairOutOfRange {
                    pair: (i, j),
                    population_size: n,
                });
            }
            let child = self.operators.crossover_pair(
                &self.population[i].chromosome,
                &self.population[j].chromosome,
                &mut self.rng,
            )?;
            check_len(self.chromosome_len, &child)?;
            children.push(child);
        }
        Ok(children)
    }

    /// Mutates the whole child batch in place.
    pub fn mutate(&mut self, children: &mut [Chromosome<P::Gene>]) -> Result<(), GaError> {
        self.operators.mutate(children, &mut self.rng);
        for c in children.iter() {
            check_len(self.chromosome_len, c)?;
        }
        Ok(())
    }

    /// Elitist generational replacement.
    ///
    /// The pool is the current best individual followed by the evaluated
    /// children. It is stable-sorted by descending fitness and truncated to
    /// the population size, so on equal fitness the incumbent wins over
    /// any child.
    pub fn replace(&mut self, children: Vec<Chromosome<P::Gene>>) -> Result<(), GaError> {
        let incumbent = self.best().clone();
        let evaluated = evaluate(
            &self.problem,
            &self.operators,
            children,
            self.config.parallel,
        )?;

        let mut pool = Vec::with_capacity(evaluated.len() + 1);
        pool.push(incumbent);
        pool.extend(evaluated);
        pool.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        pool.truncate(self.config.population_size);
        self.population = pool;
        Ok(())
    }

    /// Fitness of a chromosome: `1 / (1 + cost(decode(chromosome)))`.
    pub fn fitness(&self, chromosome: &[P::Gene]) -> Result<f64, GaError> {
        fitness_of(&self.problem, &self.operators, chromosome)
    }

    /// The fittest individual; the first one encountered on ties.
    pub fn best(&self) -> &Individual<P::Gene> {
        let mut best = &self.population[0];
        for ind in &self.population[1..] {
            if ind.fitness > best.fitness {
                best = ind;
            }
        }
        best
    }

    pub fn best_fitness(&self) -> f64 {
        self.best().fitness
    }

    pub fn best_cost(&self) -> f64 {
        self.best().cost()
    }

    /// Decoded state of [`best`](Self::best).
    pub fn best_state(&self) -> State<P::Gene> {
        self.operators.decode(&self.best().chromosome)
    }

    pub fn population(&self) -> &[Individual<P::Gene>] {
        &self.population
    }

    /// Number of generations run so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Best fitness after initialization and after every generation.
    pub fn fitness_history(&self) -> &[f64] {
        &self.fitness_history
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    pub fn operators(&self) -> &O {
        &self.operators
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }
}

fn check_len<G>(expected: usize, chromosome: &[G]) -> Result<(), GaError> {
    if chromosome.len() != expected {
        return Err(GaError::LengthMismatch {
            expected,
            found: chromosome.len(),
        });
    }
    Ok(())
}

fn fitness_of<P, O>(problem: &P, operators: &O, chromosome: &[P::Gene]) -> Result<f64, GaError>
where
    P: Problem,
    O: GeneticOperators<P::Gene>,
{
    fitness_from_cost(problem.cost(&operators.decode(chromosome)))
}

/// Pairs every chromosome with its fitness.
#[cfg(feature = "parallel")]
fn evaluate<P, O>(
    problem: &P,
    operators: &O,
    chromosomes: Vec<Chromosome<P::Gene>>,
    parallel: bool,
) -> Result<Vec<Individual<P::Gene>>, GaError>
where
    P: Problem,
    O: GeneticOperators<P::Gene>,
{
    if parallel {
        chromosomes
            .into_par_iter()
            .map(|c| fitness_of(problem, operators, &c).map(|f| Individual::new(f, c)))
            .collect()
    } else {
        chromosomes
            .into_iter()
            .map(|c| fitness_of(problem, operators, &c).map(|f| Individual::new(f, c)))
            .collect()
    }
}

/// Pairs every chromosome with its fitness.
#[cfg(not(feature = "parallel"))]
fn evaluate<P, O>(
    problem: &P,
    operators: &O,
    chromosomes: Vec<Chromosome<P::Gene>>,
    _parallel: bool,
) -> Result<Vec<Individual<P::Gene>>, GaError>
where
    P: Problem,
    O: GeneticOperators<P::Gene>,
{
    chromosomes
        .into_iter()
        .map(|c| fitness_of(problem, operators, &c).map(|f| Individual::new(f, c)))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
