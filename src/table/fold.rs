use crate::utils::errors::CsvGumError;

/// Threads `init` through `items` in order, replacing the accumulator with
/// whatever `procedure` returns for each item.
///
/// The first failing item or procedure call aborts the fold; the partial
/// accumulator is dropped with it. Per-call extra state belongs in the closure.
pub fn fold<I, T, A, E, F>(items: I, init: A, mut procedure: F) -> Result<A, E>
where
    I: IntoIterator<Item = Result<T, CsvGumError>>,
    F: FnMut(T, A) -> Result<A, E>,
    E: From<CsvGumError>,
{
    items
        .into_iter()
        .try_fold(init, |acc, item| procedure(item?, acc))
}
