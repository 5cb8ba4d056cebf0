//! Fixtures shared by the unit tests.

use crate::data::dataset::Dataset;
use crate::data::loader::{read_dataset_from, LoaderOptions};

pub(crate) const EXAMPLE_DATA: &str = "\
slashdot\tUSA\tyes\t18\tNone
google\tFrance\tyes\t23\tPremium
digg\tUSA\tyes\t24\tBasic
kiwitobes\tFrance\tyes\t23\tBasic
google\tUK\tno\t21\tPremium
(direct)\tNew Zealand\tno\t12\tNone
(direct)\tUK\tno\t21\tBasic
google\tUSA\tno\t24\tPremium
slashdot\tFrance\tyes\t19\tNone
digg\tUSA\tno\t18\tNone
google\tUK\tno\t18\tNone
kiwitobes\tUK\tno\t19\tNone
digg\tNew Zealand\tyes\t12\tBasic
slashdot\tUK\tno\t21\tNone
google\tUK\tyes\t18\tBasic
kiwitobes\tFrance\tyes\t19\tBasic
";

/// Website visitors with referrer, location, FAQ read, pages viewed and the
/// service they chose.
pub(crate) fn example_dataset() -> Dataset {
    read_dataset_from(EXAMPLE_DATA.as_bytes(), &LoaderOptions::default())
        .expect("example data is well formed")
}
