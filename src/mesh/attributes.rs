//! Per-point and per-cell attribute arrays.

/// Typed storage for a [`DataArray`].
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    /// 32-bit floats.
    Float32(Vec<f32>),
    /// 64-bit floats.
    Float64(Vec<f64>),
    /// 32-bit signed integers.
    Int32(Vec<i32>),
    /// 64-bit signed integers.
    Int64(Vec<i64>),
}

impl ArrayData {
    pub(crate) fn len(&self) -> usize {
        match self {
            ArrayData::Float32(v) => v.len(),
            ArrayData::Float64(v) => v.len(),
            ArrayData::Int32(v) => v.len(),
            ArrayData::Int64(v) => v.len(),
        }
    }

    fn empty_like(&self, capacity: usize) -> Self {
        match self {
            ArrayData::Float32(_) => ArrayData::Float32(Vec::with_capacity(capacity)),
            ArrayData::Float64(_) => ArrayData::Float64(Vec::with_capacity(capacity)),
            ArrayData::Int32(_) => ArrayData::Int32(Vec::with_capacity(capacity)),
            ArrayData::Int64(_) => ArrayData::Int64(Vec::with_capacity(capacity)),
        }
    }

    fn same_type(&self, other: &ArrayData) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Append components `[start, start + count)` of `src` to `self`.
    ///
    /// Both must hold the same type; mismatches are ignored.
    fn extend_from(&mut self, src: &ArrayData, start: usize, count: usize) {
        let range = start..start + count;
        match (self, src) {
            (ArrayData::Float32(d), ArrayData::Float32(s)) => d.extend_from_slice(&s[range]),
            (ArrayData::Float64(d), ArrayData::Float64(s)) => d.extend_from_slice(&s[range]),
            (ArrayData::Int32(d), ArrayData::Int32(s)) => d.extend_from_slice(&s[range]),
            (ArrayData::Int64(d), ArrayData::Int64(s)) => d.extend_from_slice(&s[range]),
            _ => debug_assert!(false, "mismatched array data types"),
        }
    }
}

/// A named array of fixed-width tuples.
#[derive(Debug, Clone, PartialEq)]
pub struct DataArray {
    name: String,
    num_components: usize,
    data: ArrayData,
}

impl DataArray {
    /// Create an array.
    ///
    /// `data.len()` should be a multiple of `num_components`; a trailing
    /// partial tuple is ignored by tuple accessors and rejected by
    /// [`PolyMesh::validate`](crate::mesh::PolyMesh::validate).
    pub fn new(name: impl Into<String>, num_components: usize, data: ArrayData) -> Self {
        debug_assert!(num_components > 0);
        Self {
            name: name.into(),
            num_components: num_components.max(1),
            data,
        }
    }

    /// Create a 3-component `f64` array from vectors.
    pub fn from_vectors(name: impl Into<String>, vectors: &[nalgebra::Vector3<f64>]) -> Self {
        let data = vectors.iter().flat_map(|v| [v.x, v.y, v.z]).collect();
        Self::new(name, 3, ArrayData::Float64(data))
    }

    /// Array name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Components per tuple.
    pub fn num_components(&self) -> usize {
        self.num_components
    }

    /// Number of tuples.
    pub fn num_tuples(&self) -> usize {
        self.data.len() / self.num_components
    }

    /// The raw data.
    pub fn data(&self) -> &ArrayData {
        &self.data
    }

    /// Component `c` of tuple `t`, widened to `f64`.
    pub fn component(&self, t: usize, c: usize) -> f64 {
        let i = t * self.num_components + c;
        match &self.data {
            ArrayData::Float32(v) => f64::from(v[i]),
            ArrayData::Float64(v) => v[i],
            ArrayData::Int32(v) => f64::from(v[i]),
            ArrayData::Int64(v) => v[i] as f64,
        }
    }

    /// Tuple `t` of a 3-component array as a vector.
    pub fn vector(&self, t: usize) -> nalgebra::Vector3<f64> {
        nalgebra::Vector3::new(
            self.component(t, 0),
            self.component(t, 1),
            self.component(t, 2),
        )
    }

    /// Whether `other` can be concatenated onto this array.
    pub fn is_compatible(&self, other: &DataArray) -> bool {
        self.name == other.name
            && self.num_components == other.num_components
            && self.data.same_type(&other.data)
    }

    /// Append copies of the tuples listed in `ids`, in order.
    pub fn extend_gathered(&mut self, ids: impl IntoIterator<Item = usize>) {
        let nc = self.num_components;
        let src = self.data.clone();
        for t in ids {
            self.data.extend_from(&src, t * nc, nc);
        }
    }

    /// Build a new array holding copies of the tuples listed in `ids`.
    pub fn gather(&self, ids: &[usize]) -> DataArray {
        let nc = self.num_components;
        let mut data = self.data.empty_like(ids.len() * nc);
        for &t in ids {
            data.extend_from(&self.data, t * nc, nc);
        }
        DataArray {
            name: self.name.clone(),
            num_components: nc,
            data,
        }
    }

    /// Append every tuple of a compatible array.
    pub fn append(&mut self, other: &DataArray) {
        debug_assert!(self.is_compatible(other));
        self.data.extend_from(&other.data, 0, other.data.len());
    }
}

/// An ordered collection of named arrays attached to points or cells.
///
/// One array may be designated as the normals of the set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSet {
    arrays: Vec<DataArray>,
    normals: Option<String>,
}

impl AttributeSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of arrays.
    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    /// Whether the set holds no arrays.
    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    /// Add an array, replacing any array with the same name.
    pub fn insert(&mut self, array: DataArray) {
        match self.arrays.iter_mut().find(|a| a.name == array.name) {
            Some(slot) => *slot = array,
            None => self.arrays.push(array),
        }
    }

    /// Look up an array by name.
    pub fn get(&self, name: &str) -> Option<&DataArray> {
        self.arrays.iter().find(|a| a.name == name)
    }

    /// Whether an array with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove an array by name.
    pub fn remove(&mut self, name: &str) -> Option<DataArray> {
        let pos = self.arrays.iter().position(|a| a.name == name)?;
        if self.normals.as_deref() == Some(name) {
            self.normals = None;
        }
        Some(self.arrays.remove(pos))
    }

    /// Names of all arrays, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.arrays.iter().map(|a| a.name.as_str())
    }

    /// Iterate over all arrays.
    pub fn iter(&self) -> impl Iterator<Item = &DataArray> {
        self.arrays.iter()
    }

    /// Add an array and designate it as the normals.
    pub fn set_normals(&mut self, array: DataArray) {
        self.normals = Some(array.name.clone());
        self.insert(array);
    }

    /// The designated normals array, if any.
    pub fn normals(&self) -> Option<&DataArray> {
        self.normals.as_deref().and_then(|n| self.get(n))
    }

    /// Build a new set holding the tuples listed in `ids` of every array.
    pub fn gather(&self, ids: &[usize]) -> AttributeSet {
        AttributeSet {
            arrays: self.arrays.iter().map(|a| a.gather(ids)).collect(),
            normals: self.normals.clone(),
        }
    }

    /// Append copies of the tuples listed in `ids` to every array.
    pub fn extend_gathered(&mut self, ids: &[usize]) {
        for array in &mut self.arrays {
            array.extend_gathered(ids.iter().copied());
        }
    }

    /// Concatenate sets, keeping only arrays compatible across all of them.
    pub fn concatenate(sets: &[&AttributeSet]) -> AttributeSet {
        let Some((first, rest)) = sets.split_first() else {
            return AttributeSet::new();
        };

        let mut out = AttributeSet::new();
        for array in &first.arrays {
            let parts: Option<Vec<&DataArray>> = rest
                .iter()
                .map(|s| s.get(&array.name).filter(|a| a.is_compatible(array)))
                .collect();
            if let Some(parts) = parts {
                let mut merged = array.clone();
                for part in parts {
                    merged.append(part);
                }
                out.arrays.push(merged);
            }
        }

        out.normals = first
            .normals
            .clone()
            .filter(|n| out.contains(n) && rest.iter().all(|s| s.normals.as_ref() == Some(n)));
        out
    }

    /// First array whose data does not divide into whole tuples.
    pub(crate) fn first_ragged(&self) -> Option<&DataArray> {
        self.arrays
            .iter()
            .find(|a| a.data().len() % a.num_components() != 0)
    }

    /// Name and tuple count of the first array whose tuple count differs from `expected`.
    pub(crate) fn first_mismatch(&self, expected: usize) -> Option<(&str, usize)> {
        self.arrays
            .iter()
            .find(|a| a.num_tuples() != expected)
            .map(|a| (a.name(), a.num_tuples()))
    }
}
