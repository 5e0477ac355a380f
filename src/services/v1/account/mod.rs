mod deposit;
mod show;
mod withdraw;

pub use deposit::deposit;
pub use show::show;
pub use withdraw::withdraw;

use crate::prelude::Error;

pub(crate) fn ensure_positive(amount: i64) -> Result<(), Error> {
    if amount <= 0 {
        return Err(Error::bad_request("Amount must be greater than zero"));
    }

    Ok(())
}
