//! tensem: first-order logic as tensor algebra.
//!
//! Truth values, individuals, predicates and connectives are all tensors,
//! and logical evaluation is tensor contraction:
//!
//! - truth values are the basis vectors `TRUE = (1,0)`, `FALSE = (0,1)`
//! - individuals of an N-element domain are one-hot vectors of length N
//! - predicates are `(2, N)` matrices (entity to truth value) or `(N, N)`
//!   diagonal filters (extension to extension)
//! - negation is a `(2, 2)` matrix, binary connectives are `(2, 2, 2)` tensors
//! - quantifiers are functions over extensions, since no fixed tensor
//!   computes them for every domain size
//!
//! # Example
//!
//! ```
//! use candle_core::Device;
//! use tensem::{forall, Connectives, World};
//!
//! let device = Device::Cpu;
//! let world = World::pets(&device).unwrap();
//! let c = Connectives::new(&device).unwrap();
//!
//! let cats_brown = forall(world.set("cat").unwrap(), world.set("brown").unwrap()).unwrap();
//! let dogs_brown = forall(world.set("dog").unwrap(), world.set("brown").unwrap()).unwrap();
//! assert!(c.and(&cats_brown, &c.not(&dogs_brown).unwrap()).unwrap().as_bool());
//! ```

pub mod connective;
pub mod device;
pub mod domain;
pub mod error;
pub mod predicate;
pub mod quantifier;
pub mod tensor;
pub mod truth;
pub mod truth_table;
pub mod world;

pub use connective::{
    BinaryConnective, Connectives, UnaryConnective, CONDITIONAL, CONJUNCTION, DISJUNCTION,
    NEGATION,
};
pub use device::{best_device, cpu_device};
pub use domain::{Domain, EntityVector, ExtensionVector};
pub use error::{Result, TensemError};
pub use predicate::{
    apply_predicate, apply_predicate_to_extension, extension_of, PropositionalPredicate,
    SetPredicate,
};
pub use quantifier::{exists, forall, forall_in_domain, no, some};
pub use tensor::einsum;
pub use truth::{Truth, TruthVector, FALSE, TRUE};
pub use truth_table::{TruthRow, TruthTable};
pub use world::{World, WorldConfig};
