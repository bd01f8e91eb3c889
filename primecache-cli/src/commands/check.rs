//! Single-number primality check.

use primecache::is_prime;

/// Format the verdict for `number`.
pub fn verdict(number: i64) -> String {
    if is_prime(number) {
        format!("{} is prime", number)
    } else {
        format!("{} is not prime", number)
    }
}

/// Print whether `number` is prime.
pub fn run(number: i64) {
    println!("{}", verdict(number));
}
