use crate::{Solution, Variable};
use itertools::Itertools;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// An ordered multiset of [Solution]s.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Solutions {
    inner: Vec<Solution>,
}

impl Solutions {
    /// A sequence without any solution.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The identity of the join: a single solution without bindings.
    pub fn unit() -> Self {
        Self {
            inner: vec![Solution::new()],
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Solution> {
        self.inner.iter()
    }

    pub fn push(&mut self, solution: Solution) {
        self.inner.push(solution);
    }

    pub fn as_slice(&self) -> &[Solution] {
        &self.inner
    }

    pub fn into_vec(self) -> Vec<Solution> {
        self.inner
    }

    /// Removes all duplicates. The first occurrence of each solution is kept.
    #[must_use]
    pub fn distinct(self) -> Self {
        self.inner.into_iter().unique().collect()
    }

    /// Removes duplicates that immediately follow an equal solution.
    ///
    /// This is weaker than [Self::distinct] and depends on the order of the sequence.
    #[must_use]
    pub fn reduced(mut self) -> Self {
        self.inner.dedup();
        self
    }

    /// Restricts every solution to `variables`. [None] stands for `*` and keeps all bindings.
    #[must_use]
    pub fn project(self, variables: Option<&[Variable]>) -> Self {
        match variables {
            None => self,
            Some(variables) => self
                .inner
                .iter()
                .map(|solution| solution.project(variables))
                .collect(),
        }
    }

    /// Sorts the solutions with a stable sort.
    #[must_use]
    pub fn order_by(mut self, compare: impl FnMut(&Solution, &Solution) -> Ordering) -> Self {
        self.inner.sort_by(compare);
        self
    }

    /// Skips `offset` solutions and keeps at most `limit` of the remaining ones.
    #[must_use]
    pub fn slice(self, offset: usize, limit: Option<usize>) -> Self {
        let remaining = self.inner.into_iter().skip(offset);
        match limit {
            None => remaining.collect(),
            Some(limit) => remaining.take(limit).collect(),
        }
    }

    /// Removes all bindings of non-distinguished variables from every solution.
    #[must_use]
    pub fn without_non_distinguished(self) -> Self {
        self.inner
            .into_iter()
            .map(Solution::without_non_distinguished)
            .collect()
    }
}

impl FromIterator<Solution> for Solutions {
    fn from_iter<T: IntoIterator<Item = Solution>>(iter: T) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Solution>> for Solutions {
    fn from(inner: Vec<Solution>) -> Self {
        Self { inner }
    }
}

impl Extend<Solution> for Solutions {
    fn extend<T: IntoIterator<Item = Solution>>(&mut self, iter: T) {
        self.inner.extend(iter);
    }
}

impl IntoIterator for Solutions {
    type Item = Solution;
    type IntoIter = std::vec::IntoIter<Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'solutions> IntoIterator for &'solutions Solutions {
    type Item = &'solutions Solution;
    type IntoIter = std::slice::Iter<'solutions, Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl Display for Solutions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for solution in &self.inner {
            writeln!(f, "{solution}")?;
        }
        Ok(())
    }
}
