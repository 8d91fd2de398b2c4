//! Gene specifications.
//!
//! A [`GeneSpec`] is the inclusive value range of one decision variable.
//! A [`GeneTemplate`] is the ordered list of specs every chromosome in a run
//! conforms to.

use rand::Rng;

use crate::error::{EvolutionError, Result};

/// Inclusive integer range `[lower, upper]` for one gene.
///
/// ```
/// use u_makechange::ga::GeneSpec;
///
/// let quarters = GeneSpec::new(0, 3).unwrap();
/// assert!(quarters.contains(3));
/// assert!(!quarters.contains(4));
/// assert!(GeneSpec::new(2, 1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneSpec {
    lower: i64,
    upper: i64,
}

impl GeneSpec {
    /// Creates a spec, rejecting `lower > upper`.
    ///
    /// A standalone spec has no position, so the error carries `index: None`.
    pub fn new(lower: i64, upper: i64) -> Result<Self> {
        if lower > upper {
            return Err(EvolutionError::InvalidGeneSpecification {
                index: None,
                lower,
                upper,
            });
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> i64 {
        self.lower
    }

    pub fn upper(&self) -> i64 {
        self.upper
    }

    /// Whether `value` lies inside the range.
    pub fn contains(&self, value: i64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }

    /// Clamps `value` into the range.
    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.lower, self.upper)
    }

    /// Draws a value uniformly from the range.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> i64 {
        rng.random_range(self.lower..=self.upper)
    }
}

/// Ordered gene specifications shared by every chromosome of a run.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneTemplate {
    specs: Vec<GeneSpec>,
}

impl GeneTemplate {
    /// Builds a template from already-validated specs.
    ///
    /// An empty template is rejected.
    pub fn new(specs: Vec<GeneSpec>) -> Result<Self> {
        if specs.is_empty() {
            return Err(EvolutionError::InvalidConfig(
                "gene template must contain at least one gene".into(),
            ));
        }
        Ok(Self { specs })
    }

    /// Builds a template from raw `(lower, upper)` pairs.
    ///
    /// The reported error names the first offending position.
    ///
    /// ```
    /// use u_makechange::ga::GeneTemplate;
    ///
    /// let template = GeneTemplate::from_bounds(&[(0, 3), (0, 2), (0, 1), (0, 4)]).unwrap();
    /// assert_eq!(template.len(), 4);
    /// ```
    pub fn from_bounds(bounds: &[(i64, i64)]) -> Result<Self> {
        let specs = bounds
            .iter()
            .enumerate()
            .map(|(index, &(lower, upper))| {
                GeneSpec::new(lower, upper).map_err(|_| {
                    EvolutionError::InvalidGeneSpecification {
                        index: Some(index),
                        lower,
                        upper,
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(specs)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn specs(&self) -> &[GeneSpec] {
        &self.specs
    }

    pub fn spec(&self, index: usize) -> &GeneSpec {
        &self.specs[index]
    }

    /// Draws one gene vector, each value uniform within its range.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec<i64> {
        self.specs.iter().map(|spec| spec.sample(rng)).collect()
    }

    /// Whether `genes` has the right length and every value is in range.
    pub fn accepts(&self, genes: &[i64]) -> bool {
        genes.len() == self.specs.len()
            && genes
                .iter()
                .zip(&self.specs)
                .all(|(&value, spec)| spec.contains(value))
    }
}
