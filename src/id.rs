use std::marker::PhantomData;

/// Time-ordered identifier tagged with the kind of thing it names.
///
/// The marker keeps an `ID<Match>` from being handed where some other ID is
/// expected, while the payload stays a plain v7 UUID.
pub struct ID<T> {
    uuid: uuid::Uuid,
    kind: PhantomData<fn() -> T>,
}

impl<T> ID<T> {
    pub fn uuid(&self) -> uuid::Uuid {
        self.uuid
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self::from(uuid::Uuid::now_v7())
    }
}

impl<T> From<uuid::Uuid> for ID<T> {
    fn from(uuid: uuid::Uuid) -> Self {
        Self {
            uuid,
            kind: PhantomData,
        }
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl<T> std::hash::Hash for ID<T> {
    fn hash<S>(&self, state: &mut S)
    where
        S: std::hash::Hasher,
    {
        self.uuid.hash(state);
    }
}

impl<T> std::fmt::Debug for ID<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ID({})", self.uuid)
    }
}

/// Short form for log prefixes: the random tail of the UUID.
impl<T> std::fmt::Display for ID<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let full = self.uuid.simple().to_string();
        write!(f, "{}", &full[full.len() - 8..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    struct Marker;
    #[test]
    fn distinct_and_short() {
        let a = ID::<Marker>::default();
        let b = ID::<Marker>::default();
        assert!(a != b);
        assert_eq!(a, a.clone());
        assert_eq!(a.to_string().len(), 8);
    }
}
