//! Fake data for tests: valid CPFs and customers with randomized state.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use super::cpf::Cpf;
use super::entity::{Customer, CustomerState};
use crate::domain::entity::EntityId;

const NAMES: [&str; 8] = [
    "Ada Lovelace",
    "Alan Turing",
    "Grace Hopper",
    "Edsger Dijkstra",
    "Barbara Liskov",
    "Donald Knuth",
    "Niklaus Wirth",
    "Margaret Hamilton",
];

/// Build a valid cpf from nine digits by computing both check digits.
pub fn cpf_from_digits(digits: [u8; 9]) -> Cpf {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * (10 - i as u32))
        .sum();
    let mut d1 = 11 - (sum % 11);
    if d1 >= 10 {
        d1 = 0;
    }

    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * (11 - i as u32))
        .sum::<u32>()
        + d1 * 2;
    let mut d2 = 11 - (sum % 11);
    if d2 >= 10 {
        d2 = 0;
    }

    let mut raw = String::with_capacity(11);
    for d in digits {
        raw.push(char::from(b'0' + d));
    }
    raw.push(char::from(b'0' + d1 as u8));
    raw.push(char::from(b'0' + d2 as u8));

    Cpf::parse(&raw).expect("generated cpf must carry a valid checksum")
}

/// Generate a random valid cpf.
pub fn fake_cpf(rng: &mut impl Rng) -> Cpf {
    let mut digits = [0u8; 9];
    for digit in &mut digits {
        *digit = rng.gen_range(0..=9);
    }
    cpf_from_digits(digits)
}

/// A customer with a random creation instant somewhere in the last ~60
/// years and an id stamped with that same instant.
pub fn fake_customer(rng: &mut impl Rng) -> Customer {
    fake_customer_with(rng, None, None)
}

pub fn fake_customer_with(
    rng: &mut impl Rng,
    name: Option<&str>,
    cpf: Option<Cpf>,
) -> Customer {
    let created = random_past_instant(rng);
    let name = name
        .map(str::to_string)
        .unwrap_or_else(|| format!("{} {}", NAMES[rng.gen_range(0..NAMES.len())], rng.gen_range(0..10_000)));

    Customer::restore(
        EntityId::from_datetime(created),
        CustomerState {
            name,
            cpf: cpf.unwrap_or_else(|| fake_cpf(rng)),
            birthdate: created - Duration::days(rng.gen_range(6_000..20_000)),
            created,
        },
    )
}

fn random_past_instant(rng: &mut impl Rng) -> DateTime<Utc> {
    // Up to roughly 60 years back, millisecond granularity.
    Utc::now() - Duration::milliseconds(rng.gen_range(0..1_900_000_000_000i64))
}
