use geni_urn::Urn;

/// The aggregate serving the call being authorized.
pub trait Aggregate: Send + Sync {
    /// The URN identifying this aggregate manager.
    fn own_urn(&self) -> &Urn;
}

/// An aggregate known only by its URN.
impl Aggregate for Urn {
    fn own_urn(&self) -> &Urn {
        self
    }
}
