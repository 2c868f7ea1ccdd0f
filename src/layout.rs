//! Algebra layouts: blade enumeration and precomputed multiplication tables.
//!
//! A [`Layout`] is built once per metric signature and is immutable after
//! construction, so it can be shared (`Arc`) by every multivector of that
//! algebra without locking. All products are table lookups; nothing is
//! recomputed per multiplication.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::multivector::MultiVector;
use crate::types::Scalar;

/// Largest supported vector-space dimension.
///
/// The four dense multiplication tables are O(4^n); beyond this bound they
/// no longer fit comfortably in memory and would need sparse storage.
pub const MAX_DIMENSION: usize = 10;

/// A multiplication table entry: (sign, result blade index).
///
/// Grade-filtered tables (outer, inner, left contraction) store a sign of
/// zero for the pairs their product discards.
pub type TableEntry = (Scalar, usize);

/// Immutable description of a geometric algebra with a given signature.
///
/// Holds the 2^n basis blades in canonical order (ascending grade, then
/// ascending bitmask), their names, and the geometric / outer / inner /
/// left-contraction multiplication tables derived from the metric.
pub struct Layout {
    sig: Vec<i8>,
    dims: usize,
    ga_dims: usize,
    masks: Vec<u32>,
    grades: Vec<usize>,
    names: Vec<String>,
    index_of_mask: Vec<usize>,
    name_to_index: HashMap<String, usize>,
    gmt: Vec<TableEntry>,
    omt: Vec<TableEntry>,
    imt: Vec<TableEntry>,
    lcmt: Vec<TableEntry>,
    adjoint_signs: Vec<Scalar>,
}

/// Reordering parity for the product of two blade bitmasks, ignoring the
/// metric: +1 / -1 depending on how many transpositions are needed to sort
/// the concatenation of `a`'s and `b`'s basis vectors into ascending order.
/// Dorst, "Geometric Algebra for Computer Science", ch. 19.
fn reordering_sign_euclidean(a: u32, b: u32) -> i32 {
    let mut a = a >> 1;
    let mut swaps = 0u32;
    while a != 0 {
        swaps += (a & b).count_ones();
        a >>= 1;
    }
    if swaps & 1 == 0 {
        1
    } else {
        -1
    }
}

/// Full sign for blade product `a * b`: reordering parity times the metric
/// factor of every contracted (shared) basis vector.
fn reordering_sign(a: u32, b: u32, sig: &[i8]) -> Scalar {
    let mut sign = reordering_sign_euclidean(a, b) as Scalar;
    let mut shared = a & b;
    let mut i = 0;
    while shared != 0 {
        if shared & 1 != 0 {
            sign *= sig[i] as Scalar;
        }
        shared >>= 1;
        i += 1;
    }
    sign
}

impl Layout {
    /// Build the layout for the given signature.
    ///
    /// Entries must be +1 or -1 and the dimension must not exceed
    /// [`MAX_DIMENSION`].
    pub fn new(signature: &[i8]) -> Result<Layout> {
        for (index, &value) in signature.iter().enumerate() {
            if value != 1 && value != -1 {
                return Err(Error::InvalidSignature { index, value });
            }
        }
        let dims = signature.len();
        if dims > MAX_DIMENSION {
            return Err(Error::UnsupportedDimension {
                dims,
                max: MAX_DIMENSION,
            });
        }
        let ga_dims = 1usize << dims;

        // Canonical blade order: ascending grade, then ascending bitmask.
        let mut masks: Vec<u32> = (0..ga_dims as u32).collect();
        masks.sort_by_key(|&m| (m.count_ones(), m));

        let grades: Vec<usize> = masks.iter().map(|m| m.count_ones() as usize).collect();

        let mut index_of_mask = vec![0usize; ga_dims];
        for (idx, &m) in masks.iter().enumerate() {
            index_of_mask[m as usize] = idx;
        }

        // Blade names use 1-based basis-vector indices: e1, e12, e123, ...
        // The scalar has the empty name.
        let mut names = Vec::with_capacity(ga_dims);
        let mut name_to_index = HashMap::new();
        for (idx, &m) in masks.iter().enumerate() {
            let mut name = String::new();
            if m != 0 {
                name.push('e');
                for bit in 0..dims {
                    if m >> bit & 1 != 0 {
                        name.push_str(&(bit + 1).to_string());
                    }
                }
                name_to_index.insert(name.clone(), idx);
            }
            names.push(name);
        }

        // Multiplication tables. The geometric table is total; the others
        // keep an entry only when the result grade satisfies the product's
        // grade rule, storing sign 0 otherwise.
        let mut gmt = Vec::with_capacity(ga_dims * ga_dims);
        let mut omt = Vec::with_capacity(ga_dims * ga_dims);
        let mut imt = Vec::with_capacity(ga_dims * ga_dims);
        let mut lcmt = Vec::with_capacity(ga_dims * ga_dims);
        for i in 0..ga_dims {
            let (ma, ga) = (masks[i], grades[i]);
            for j in 0..ga_dims {
                let (mb, gb) = (masks[j], grades[j]);
                let sign = reordering_sign(ma, mb, signature);
                let k = index_of_mask[(ma ^ mb) as usize];
                let gk = grades[k];
                gmt.push((sign, k));
                omt.push(if gk == ga + gb { (sign, k) } else { (0.0, k) });
                // A_r . B_s = <A_r B_s>_|r-s| for r,s != 0
                imt.push(if ga != 0 && gb != 0 && gk == ga.abs_diff(gb) {
                    (sign, k)
                } else {
                    (0.0, k)
                });
                // A_r _| B_s = <A_r B_s>_(s-r) for s >= r
                lcmt.push(if gb >= ga && gk == gb - ga {
                    (sign, k)
                } else {
                    (0.0, k)
                });
            }
        }

        // Reversion flips blades whose grade k has k(k-1)/2 odd, which is
        // exactly k mod 4 ∈ {2, 3}.
        let adjoint_signs = grades
            .iter()
            .map(|&k| if k % 4 < 2 { 1.0 } else { -1.0 })
            .collect();

        Ok(Layout {
            sig: signature.to_vec(),
            dims,
            ga_dims,
            masks,
            grades,
            names,
            index_of_mask,
            name_to_index,
            gmt,
            omt,
            imt,
            lcmt,
            adjoint_signs,
        })
    }

    /// Vector-space dimension n.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Number of basis blades, 2^n.
    pub fn ga_dims(&self) -> usize {
        self.ga_dims
    }

    /// The normalized signature.
    pub fn signature(&self) -> &[i8] {
        &self.sig
    }

    /// Grade of the blade at `index`.
    pub fn grade_of(&self, index: usize) -> usize {
        self.grades[index]
    }

    /// Grades of all blades, in blade order.
    pub fn grades(&self) -> &[usize] {
        &self.grades
    }

    /// Bitmask of the blade at `index`.
    pub fn mask_of(&self, index: usize) -> u32 {
        self.masks[index]
    }

    /// Blade index for a bitmask.
    pub fn index_of_mask(&self, mask: u32) -> usize {
        self.index_of_mask[mask as usize]
    }

    /// Canonical name of the blade at `index` (empty for the scalar).
    pub fn name_of(&self, index: usize) -> &str {
        &self.names[index]
    }

    /// All blade names, in blade order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub(crate) fn gmt(&self) -> &[TableEntry] {
        &self.gmt
    }

    pub(crate) fn omt(&self) -> &[TableEntry] {
        &self.omt
    }

    pub(crate) fn imt(&self) -> &[TableEntry] {
        &self.imt
    }

    pub(crate) fn lcmt(&self) -> &[TableEntry] {
        &self.lcmt
    }

    pub(crate) fn adjoint_signs(&self) -> &[Scalar] {
        &self.adjoint_signs
    }

    /// Basis blade by canonical name, e.g. `"e12"`.
    pub fn blade(self: &Arc<Self>, name: &str) -> Result<MultiVector> {
        let &idx = self
            .name_to_index
            .get(name)
            .ok_or_else(|| Error::UnknownBlade(name.to_string()))?;
        Ok(MultiVector::basis(self, idx))
    }

    /// Basis blade by bitmask over the basis vectors.
    pub fn blade_from_mask(self: &Arc<Self>, mask: u32) -> Result<MultiVector> {
        if mask as usize >= self.ga_dims {
            return Err(Error::UnknownBlade(format!("mask {:#b}", mask)));
        }
        Ok(MultiVector::basis(self, self.index_of_mask[mask as usize]))
    }

    /// The i-th basis vector (0-based).
    pub fn basis_vector(self: &Arc<Self>, i: usize) -> Result<MultiVector> {
        if i >= self.dims {
            return Err(Error::UnknownBlade(format!("e{}", i + 1)));
        }
        Ok(MultiVector::basis(self, self.index_of_mask[1 << i]))
    }

    /// All basis vectors, in order.
    pub fn basis_vectors(self: &Arc<Self>) -> Vec<MultiVector> {
        (0..self.dims)
            .map(|i| MultiVector::basis(self, self.index_of_mask[1 << i]))
            .collect()
    }

    /// Map from blade name to basis blade, for every non-scalar blade.
    pub fn blades(self: &Arc<Self>) -> HashMap<String, MultiVector> {
        self.name_to_index
            .iter()
            .map(|(name, &idx)| (name.clone(), MultiVector::basis(self, idx)))
            .collect()
    }

    /// The unit pseudoscalar e1...en.
    pub fn pseudoscalar(self: &Arc<Self>) -> MultiVector {
        MultiVector::basis(self, self.ga_dims - 1)
    }

    /// A scalar multivector in this layout.
    pub fn scalar(self: &Arc<Self>, s: Scalar) -> MultiVector {
        MultiVector::scalar(self, s)
    }

    /// A multivector from raw coefficients in blade order.
    pub fn multivector(self: &Arc<Self>, value: Vec<Scalar>) -> Result<MultiVector> {
        MultiVector::new(self.clone(), value)
    }
}

impl PartialEq for Layout {
    fn eq(&self, other: &Self) -> bool {
        self.sig == other.sig
    }
}

impl Eq for Layout {}

impl std::fmt::Debug for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Layout")
            .field("sig", &self.sig)
            .field("ga_dims", &self.ga_dims)
            .finish()
    }
}

/// Build a shared layout for the given signature.
pub fn build_layout(signature: &[i8]) -> Result<Arc<Layout>> {
    Ok(Arc::new(Layout::new(signature)?))
}
