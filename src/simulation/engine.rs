//! The genome/network capability seam and its default MLP implementation.
//!
//! The simulation core never inspects genome or network internals. It only
//! calls the four operations of [`NetworkEngine`]: create a fresh genome,
//! cross two parent genomes into a child, mutate a genome, and build an
//! activatable network from a genome. Any engine honoring those contracts can
//! drive the agents; [`MlpEngine`] is the one shipped with the crate.

use ndarray::{Array1, Array2};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use thiserror::Error;

/// Failures surfaced by a genome/network engine.
///
/// The core never recovers a corrupted genome; these propagate to the caller
/// and abort the operation that triggered them.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An observation vector of the wrong length was fed to a network.
    #[error("network expected {expected} inputs, got {got}")]
    InputLength {
        /// Input size the network was built for.
        expected: usize,
        /// Length of the vector actually supplied.
        got: usize,
    },
    /// A genome handed to the engine does not belong to it.
    #[error("incompatible genome: {0}")]
    IncompatibleGenome(String),
    /// Any other engine-internal failure.
    #[error("engine failure: {0}")]
    Internal(String),
}

/// An activatable feed-forward network derived from a genome.
pub trait Network {
    /// Runs one forward pass. Outputs are normalized into `[0, 1]`.
    fn activate(&self, inputs: &Array1<f32>) -> Result<Array1<f32>, EngineError>;
}

/// Pluggable genome/network engine.
///
/// Every genome returned from [`new_genome`](Self::new_genome) or
/// [`crossover`](Self::crossover) is a fresh, independently owned value;
/// ownership transfers to the agent constructed around it.
pub trait NetworkEngine {
    /// Opaque evolvable encoding of a network.
    type Genome: Clone;
    /// Network type built from a genome.
    type Network: Network;

    /// Creates and configures a brand-new genome.
    fn new_genome(&mut self, id: u64) -> Result<Self::Genome, EngineError>;

    /// Produces a child genome from two parents. Self-crossover (`a` and `b`
    /// being the same genome) is legal and is how the evolution controller
    /// breeds.
    fn crossover(
        &mut self,
        a: &Self::Genome,
        b: &Self::Genome,
    ) -> Result<Self::Genome, EngineError>;

    /// Mutates a genome in place.
    fn mutate(&mut self, genome: &mut Self::Genome) -> Result<(), EngineError>;

    /// Builds an activatable network from a genome.
    fn build_network(&self, genome: &Self::Genome) -> Result<Self::Network, EngineError>;
}

/// One dense layer: weights (`output x input`) plus biases.
#[derive(Debug, Clone)]
pub struct MlpLayer {
    /// Weight matrix.
    pub weights: Array2<f32>,
    /// Bias vector.
    pub biases: Array1<f32>,
}

impl MlpLayer {
    fn new_random(input_size: usize, output_size: usize, scale: f32) -> Self {
        Self {
            weights: Array2::random((output_size, input_size), Uniform::new(-scale, scale)),
            biases: Array1::random(output_size, Uniform::new(-scale, scale)),
        }
    }

    /// Forward pass with tanh activation.
    fn forward(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut output = self.weights.dot(inputs);
        output += &self.biases;
        output.mapv_inplace(f32::tanh);
        output
    }

    fn mutate(&mut self, mutation_scale: f32) {
        self.weights += &Array2::random(
            self.weights.dim(),
            Uniform::new(-mutation_scale, mutation_scale),
        );
        self.biases += &Array1::random(
            self.biases.len(),
            Uniform::new(-mutation_scale, mutation_scale),
        );
    }

    fn crossover(parent1: &MlpLayer, parent2: &MlpLayer) -> Self {
        Self {
            weights: &parent1.weights * 0.5 + &parent2.weights * 0.5,
            biases: &parent1.biases * 0.5 + &parent2.biases * 0.5,
        }
    }
}

/// Weight-encoding genome of the default engine: the full layer stack.
#[derive(Debug, Clone)]
pub struct MlpGenome {
    /// Identifier assigned at creation, carried for observability.
    pub id: u64,
    layers: Vec<MlpLayer>,
}

/// Feed-forward network built from an [`MlpGenome`].
#[derive(Debug, Clone)]
pub struct MlpNetwork {
    layers: Vec<MlpLayer>,
    input_size: usize,
}

impl Network for MlpNetwork {
    fn activate(&self, inputs: &Array1<f32>) -> Result<Array1<f32>, EngineError> {
        if inputs.len() != self.input_size {
            return Err(EngineError::InputLength {
                expected: self.input_size,
                got: inputs.len(),
            });
        }
        let mut output = inputs.clone();
        for layer in &self.layers {
            output = layer.forward(&output);
        }
        // tanh lands in [-1, 1]; actuation expects [0, 1].
        output.mapv_inplace(|x| 0.5 * (x + 1.0));
        Ok(output)
    }
}

/// Default engine: fixed-topology MLP with averaging crossover and
/// uniform-noise mutation.
#[derive(Debug, Clone)]
pub struct MlpEngine {
    layer_sizes: Vec<usize>,
    init_scale: f32,
    mutation_scale: f32,
}

impl MlpEngine {
    /// Creates an engine producing networks with the given layer sizes
    /// (input first, output last).
    pub fn new(layer_sizes: Vec<usize>, init_scale: f32, mutation_scale: f32) -> Self {
        Self {
            layer_sizes,
            init_scale,
            mutation_scale,
        }
    }

    fn check_compatible(&self, genome: &MlpGenome) -> Result<(), EngineError> {
        if genome.layers.len() != self.layer_sizes.len() - 1 {
            return Err(EngineError::IncompatibleGenome(format!(
                "genome {} has {} layers, engine expects {}",
                genome.id,
                genome.layers.len(),
                self.layer_sizes.len() - 1
            )));
        }
        Ok(())
    }
}

impl NetworkEngine for MlpEngine {
    type Genome = MlpGenome;
    type Network = MlpNetwork;

    fn new_genome(&mut self, id: u64) -> Result<MlpGenome, EngineError> {
        let layers = (0..self.layer_sizes.len() - 1)
            .map(|i| {
                MlpLayer::new_random(self.layer_sizes[i], self.layer_sizes[i + 1], self.init_scale)
            })
            .collect();
        Ok(MlpGenome { id, layers })
    }

    fn crossover(&mut self, a: &MlpGenome, b: &MlpGenome) -> Result<MlpGenome, EngineError> {
        self.check_compatible(a)?;
        self.check_compatible(b)?;
        let layers = a
            .layers
            .iter()
            .zip(&b.layers)
            .map(|(la, lb)| MlpLayer::crossover(la, lb))
            .collect();
        Ok(MlpGenome { id: a.id, layers })
    }

    fn mutate(&mut self, genome: &mut MlpGenome) -> Result<(), EngineError> {
        self.check_compatible(genome)?;
        for layer in &mut genome.layers {
            layer.mutate(self.mutation_scale);
        }
        Ok(())
    }

    fn build_network(&self, genome: &MlpGenome) -> Result<MlpNetwork, EngineError> {
        self.check_compatible(genome)?;
        Ok(MlpNetwork {
            layers: genome.layers.clone(),
            input_size: self.layer_sizes[0],
        })
    }
}

impl MlpGenome {
    /// Flattens all weights and biases, oldest layer first. Used by tests to
    /// compare genome contents without exposing the layer stack.
    pub fn to_flat_vector(&self) -> Vec<f32> {
        let mut flat = Vec::new();
        for layer in &self.layers {
            flat.extend(layer.weights.iter().copied());
            flat.extend(layer.biases.iter().copied());
        }
        flat
    }
}
