use super::vec::RacePredicated;
use super::{Delivery, Predicate, RacePredicated as RacePredicatedTrait};

use core::future::IntoFuture;

impl<Fut, T, E, const N: usize> RacePredicatedTrait for [Fut; N]
where
    Fut: IntoFuture<Output = Result<T, E>>,
{
    type Task = Fut::IntoFuture;

    fn race_predicated_with<P, M, PE>(
        self,
        predicate: P,
        mode: M,
    ) -> RacePredicated<Self::Task, P, M>
    where
        P: Predicate<Self::Task, Error = PE>,
        M: Delivery<Self::Task, PE>,
    {
        let tasks = self.into_iter().map(IntoFuture::into_future).collect();
        RacePredicated::new(tasks, predicate, mode)
    }
}
