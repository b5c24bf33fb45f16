//! Domains, entities and extensions.
//!
//! A domain is a finite, ordered set of N individuals. Individual `i` is the
//! one-hot vector `e_i` of length N, and any subset of the domain (the
//! extension of a predicate, a named set) is a 0/1 vector of length N.
//!
//! ```text
//! domain: [john, chris, tom]
//! chris           = (0, 1, 0)
//! {john, chris}   = (1, 1, 0)
//! universe        = (1, 1, 1)
//! ```

use candle_core::{DType, Device, Tensor};
use indexmap::IndexMap;
use tracing::debug;

use crate::error::{dims_mismatch, Result, TensemError};
use crate::tensor::{einsum, is_binary, to_f32};

/// A finite domain of `size` individuals on one device.
///
/// Entity names are optional; when given they fix the ordering convention
/// (position `i` is the `i`-th name).
#[derive(Debug, Clone)]
pub struct Domain {
    size: usize,
    names: IndexMap<String, usize>,
    device: Device,
}

impl Domain {
    /// Create an anonymous domain of `size` individuals.
    pub fn new(size: usize, device: &Device) -> Result<Self> {
        if size == 0 {
            return Err(TensemError::MalformedTensor(
                "domain must contain at least one entity".into(),
            ));
        }
        debug!(size, "created domain");
        Ok(Self {
            size,
            names: IndexMap::new(),
            device: device.clone(),
        })
    }

    /// Create a domain whose ordering is given by `names`.
    ///
    /// # Example
    /// ```
    /// use candle_core::Device;
    /// use tensem::Domain;
    ///
    /// let domain = Domain::with_entities(["john", "chris", "tom"], &Device::Cpu).unwrap();
    /// assert_eq!(domain.size(), 3);
    /// assert_eq!(domain.entity_named("tom").unwrap().index(), 2);
    /// ```
    pub fn with_entities<I, S>(names: I, device: &Device) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = IndexMap::new();
        for name in names {
            let name = name.into();
            let position = index.len();
            if index.insert(name.clone(), position).is_some() {
                return Err(TensemError::MalformedTensor(format!(
                    "duplicate entity name '{}'",
                    name
                )));
            }
        }

        let mut domain = Self::new(index.len(), device)?;
        domain.names = index;
        Ok(domain)
    }

    /// Number of individuals (N).
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Entity names in domain order. Empty for anonymous domains.
    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(|s| s.as_str())
    }

    /// Name of the individual at `index`, if the domain is named.
    pub fn name_of(&self, index: usize) -> Option<&str> {
        self.names.get_index(index).map(|(name, _)| name.as_str())
    }

    /// Position of a named individual.
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| TensemError::UnknownEntity(name.to_string()))
    }

    /// One-hot vector of the individual at `index`.
    pub fn entity(&self, index: usize) -> Result<EntityVector> {
        self.check_index(index)?;
        let mut data = vec![0.0f32; self.size];
        data[index] = 1.0;
        let tensor = Tensor::from_vec(data, self.size, &self.device)?;
        Ok(EntityVector { tensor, index })
    }

    /// One-hot vector of a named individual.
    pub fn entity_named(&self, name: &str) -> Result<EntityVector> {
        self.entity(self.index_of(name)?)
    }

    /// The all-ones extension: every individual.
    pub fn universe(&self) -> Result<ExtensionVector> {
        let tensor = Tensor::ones(self.size, DType::F32, &self.device)?;
        Ok(ExtensionVector { tensor })
    }

    /// The all-zeros extension: no individual.
    pub fn empty(&self) -> Result<ExtensionVector> {
        let tensor = Tensor::zeros(self.size, DType::F32, &self.device)?;
        Ok(ExtensionVector { tensor })
    }

    /// Extension containing exactly the individuals at `members`.
    pub fn extension_of_members(&self, members: &[usize]) -> Result<ExtensionVector> {
        let mut data = vec![0.0f32; self.size];
        for &index in members {
            self.check_index(index)?;
            data[index] = 1.0;
        }
        let tensor = Tensor::from_vec(data, self.size, &self.device)?;
        Ok(ExtensionVector { tensor })
    }

    /// Extension containing exactly the named individuals.
    pub fn extension_of_names(&self, names: &[&str]) -> Result<ExtensionVector> {
        let members = names
            .iter()
            .map(|name| self.index_of(name))
            .collect::<Result<Vec<_>>>()?;
        self.extension_of_members(&members)
    }

    /// Names of the members of `extension`, falling back to positions for
    /// anonymous domains.
    pub fn member_names(&self, extension: &ExtensionVector) -> Result<Vec<String>> {
        self.check_extension(extension)?;
        Ok(extension
            .members()?
            .into_iter()
            .map(|i| match self.name_of(i) {
                Some(name) => name.to_string(),
                None => format!("#{}", i),
            })
            .collect())
    }

    /// Check that an extension has this domain's length.
    pub fn check_extension(&self, extension: &ExtensionVector) -> Result<()> {
        if extension.len() != self.size {
            return Err(dims_mismatch(&[self.size], &[extension.len()]));
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.size {
            return Err(TensemError::IndexOutOfRange {
                index,
                size: self.size,
            });
        }
        Ok(())
    }
}

/// A one-hot vector naming a single individual by position.
#[derive(Debug, Clone)]
pub struct EntityVector {
    tensor: Tensor,
    index: usize,
}

impl EntityVector {
    /// Wrap a caller tensor, checking that it is rank 1 and one-hot.
    pub fn new(tensor: Tensor) -> Result<Self> {
        let tensor = to_f32(&tensor)?;
        if tensor.rank() != 1 {
            return Err(TensemError::InvalidEntityVector(
                tensor.flatten_all()?.to_vec1::<f32>()?,
            ));
        }
        let values = tensor.to_vec1::<f32>()?;

        let ones: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == 1.0)
            .map(|(i, _)| i)
            .collect();
        if ones.len() != 1 || !is_binary(&values) {
            return Err(TensemError::InvalidEntityVector(values));
        }

        Ok(Self {
            tensor,
            index: ones[0],
        })
    }

    /// Position of the individual in its domain.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Length of the vector (N).
    pub fn len(&self) -> usize {
        self.tensor.dims()[0]
    }

    /// Always false; an entity vector has exactly one nonzero coordinate.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn as_tensor(&self) -> &Tensor {
        &self.tensor
    }
}

/// A 0/1 vector of length N: a subset of the domain.
#[derive(Debug, Clone)]
pub struct ExtensionVector {
    tensor: Tensor,
}

impl ExtensionVector {
    /// Wrap a caller tensor, checking that it is rank 1 with 0/1 entries.
    pub fn new(tensor: Tensor) -> Result<Self> {
        let tensor = to_f32(&tensor)?;
        if tensor.rank() != 1 {
            return Err(TensemError::MalformedTensor(format!(
                "extension must be rank 1, got shape {:?}",
                tensor.dims()
            )));
        }
        let values = tensor.to_vec1::<f32>()?;
        if !is_binary(&values) {
            return Err(TensemError::MalformedTensor(format!(
                "extension entries must be 0 or 1, got {:?}",
                values
            )));
        }
        Ok(Self { tensor })
    }

    /// Length of the vector (N), not the number of members.
    pub fn len(&self) -> usize {
        self.tensor.dims()[0]
    }

    /// True when no individual is a member.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.cardinality()? == 0)
    }

    /// Number of members.
    pub fn cardinality(&self) -> Result<usize> {
        Ok(self.members()?.len())
    }

    /// Positions of the members, ascending.
    pub fn members(&self) -> Result<Vec<usize>> {
        Ok(self
            .to_vec()?
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == 1.0)
            .map(|(i, _)| i)
            .collect())
    }

    /// Membership test: `e · x = 1`.
    pub fn contains(&self, entity: &EntityVector) -> Result<bool> {
        let hit: f32 = einsum("i,i->", &[&self.tensor, entity.as_tensor()])?.to_scalar()?;
        Ok(hit == 1.0)
    }

    /// Intersection, as the elementwise product.
    pub fn and(&self, other: &Self) -> Result<Self> {
        let tensor = einsum("i,i->i", &[&self.tensor, &other.tensor])?;
        Ok(Self { tensor })
    }

    /// Union, as the elementwise maximum.
    pub fn or(&self, other: &Self) -> Result<Self> {
        self.check_same_len(other)?;
        let tensor = self.tensor.maximum(&other.tensor)?;
        Ok(Self { tensor })
    }

    /// Complement relative to the universe: `1 - x`.
    pub fn complement(&self) -> Result<Self> {
        let tensor = self.tensor.affine(-1.0, 1.0)?;
        Ok(Self { tensor })
    }

    pub fn to_vec(&self) -> Result<Vec<f32>> {
        Ok(self.tensor.to_vec1::<f32>()?)
    }

    pub fn as_tensor(&self) -> &Tensor {
        &self.tensor
    }

    pub fn device(&self) -> &Device {
        self.tensor.device()
    }

    pub(crate) fn check_same_len(&self, other: &Self) -> Result<()> {
        if self.len() != other.len() {
            return Err(dims_mismatch(&[self.len()], &[other.len()]));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> Domain {
        Domain::with_entities(["john", "chris", "tom"], &Device::Cpu).unwrap()
    }

    fn ext(values: &[f32]) -> ExtensionVector {
        ExtensionVector::new(Tensor::new(values, &Device::Cpu).unwrap()).unwrap()
    }

    #[test]
    fn test_entity_is_one_hot() {
        let domain = people();
        let chris = domain.entity(1).unwrap();
        assert_eq!(chris.index(), 1);
        assert_eq!(
            chris.as_tensor().to_vec1::<f32>().unwrap(),
            vec![0.0, 1.0, 0.0]
        );
    }

    #[test]
    fn test_entity_out_of_range() {
        let domain = people();
        let err = domain.entity(3).unwrap_err();
        assert!(matches!(
            err,
            TensemError::IndexOutOfRange { index: 3, size: 3 }
        ));
    }

    #[test]
    fn test_entity_named() {
        let domain = people();
        assert_eq!(domain.entity_named("tom").unwrap().index(), 2);
        assert!(matches!(
            domain.entity_named("alice"),
            Err(TensemError::UnknownEntity(_))
        ));
    }

    #[test]
    fn test_empty_domain_rejected() {
        assert!(Domain::new(0, &Device::Cpu).is_err());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = Domain::with_entities(["a", "b", "a"], &Device::Cpu).unwrap_err();
        assert!(matches!(err, TensemError::MalformedTensor(_)));
    }

    #[test]
    fn test_universe_and_empty() {
        let domain = people();
        assert_eq!(domain.universe().unwrap().to_vec().unwrap(), vec![1.0; 3]);
        assert!(domain.empty().unwrap().is_empty().unwrap());
    }

    #[test]
    fn test_entity_vector_validation() {
        let device = Device::Cpu;
        let ok = EntityVector::new(Tensor::new(&[0.0f32, 0.0, 1.0], &device).unwrap()).unwrap();
        assert_eq!(ok.index(), 2);

        for bad in [&[0.0f32, 0.0, 0.0][..], &[1.0, 1.0, 0.0][..], &[0.0, 2.0, 0.0][..]] {
            let err = EntityVector::new(Tensor::new(bad, &device).unwrap()).unwrap_err();
            assert!(matches!(err, TensemError::InvalidEntityVector(_)));
        }
    }

    #[test]
    fn test_extension_validation() {
        let err = ExtensionVector::new(Tensor::new(&[0.0f32, 0.5], &Device::Cpu).unwrap())
            .unwrap_err();
        assert!(matches!(err, TensemError::MalformedTensor(_)));
    }

    #[test]
    fn test_and_or_complement() {
        let dogs = ext(&[1.0, 1.0, 0.0]);
        let brown = ext(&[0.0, 1.0, 1.0]);

        assert_eq!(dogs.and(&brown).unwrap().to_vec().unwrap(), vec![0.0, 1.0, 0.0]);
        assert_eq!(dogs.or(&brown).unwrap().to_vec().unwrap(), vec![1.0, 1.0, 1.0]);
        assert_eq!(dogs.complement().unwrap().to_vec().unwrap(), vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_mismatched_lengths() {
        let a = ext(&[1.0, 0.0, 0.0]);
        let b = ext(&[1.0, 0.0]);

        assert!(matches!(a.and(&b), Err(TensemError::DimensionMismatch { .. })));
        assert!(matches!(a.or(&b), Err(TensemError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_members_and_contains() {
        let domain = people();
        let mathematicians = domain.extension_of_names(&["john", "chris"]).unwrap();

        assert_eq!(mathematicians.members().unwrap(), vec![0, 1]);
        assert_eq!(mathematicians.cardinality().unwrap(), 2);
        assert!(mathematicians.contains(&domain.entity(0).unwrap()).unwrap());
        assert!(!mathematicians.contains(&domain.entity(2).unwrap()).unwrap());
        assert_eq!(
            domain.member_names(&mathematicians).unwrap(),
            vec!["john".to_string(), "chris".to_string()]
        );
    }
}
