//! Built-in word lists for fake text.

use rand::rngs::StdRng;
use rand::RngExt;

pub const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Carlos", "Lucia", "Miguel", "Sofia", "Ahmed", "Fatima", "Wei", "Mei", "Hiroshi", "Yuki",
    "Olga", "Ivan",
];

pub const MIDDLE_NAMES: &[&str] = &[
    "Lee", "Ann", "Marie", "Ray", "Lynn", "Grace", "Jean", "Rose", "Alan", "James", "Louise",
    "Paul",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Taylor", "Moore",
    "Jackson", "Martin", "Lee", "Thompson", "White", "Harris", "Clark", "Lewis", "Walker",
    "Young", "Allen", "King", "Wright",
];

const COMPANY_STEMS: &[&str] = &[
    "Acme", "Globex", "Initech", "Umbrella", "Stark", "Wayne", "Hooli", "Vandelay", "Cyberdyne",
    "Soylent", "Tyrell", "Wonka", "Aperture", "Massive", "Oscorp", "Nakatomi",
];

const COMPANY_SUFFIXES: &[&str] = &[
    "Inc", "LLC", "Group", "Ltd", "and Sons", "Holdings", "Labs", "Partners",
];

pub const JOBS: &[&str] = &[
    "Software Engineer",
    "Accountant",
    "Data Analyst",
    "Product Manager",
    "Graphic Designer",
    "Sales Representative",
    "Nurse",
    "Civil Engineer",
    "Teacher",
    "Marketing Specialist",
    "HR Coordinator",
    "Financial Advisor",
    "Architect",
    "Pharmacist",
    "Technical Writer",
];

pub const CITIES: &[&str] = &[
    "New York", "Los Angeles", "Chicago", "Houston", "Phoenix", "Philadelphia", "San Antonio",
    "San Diego", "Dallas", "Austin", "Seattle", "Denver", "Boston", "Portland", "Miami",
    "Atlanta",
];

pub const STATES: &[&str] = &[
    "California", "Texas", "Florida", "New York", "Illinois", "Pennsylvania", "Ohio", "Georgia",
    "Washington", "Colorado", "Oregon", "Arizona", "Massachusetts", "Michigan",
];

const STREET_NAMES: &[&str] = &[
    "Main", "Oak", "Pine", "Maple", "Cedar", "Elm", "Washington", "Lake", "Hill", "Park",
    "Sunset", "River",
];

const STREET_SUFFIXES: &[&str] = &["St", "Ave", "Blvd", "Rd", "Ln", "Dr", "Ct", "Way"];

const DOMAINS: &[&str] = &["example.com", "example.org", "example.net", "mail.test"];

pub const ROLES: &[&str] = &[
    "Developer",
    "Manager",
    "Analyst",
    "Consultant",
    "Engineer",
    "Scrum Master",
];

pub const BENEFITS: &[&str] = &[
    "Health Insurance",
    "Retirement Plan",
    "Bonus",
    "Paid Leave",
];

pub const STATUSES: &[&str] = &["ACTIVE", "INACTIVE", "PENDING", "APPROVED", "FINAL"];

pub const WORDS: &[&str] = &[
    "alpha", "bright", "canvas", "delta", "echo", "forest", "garden", "harbor", "island",
    "jungle", "kernel", "lantern", "meadow", "nebula", "orbit", "prairie", "quartz", "river",
    "summit", "timber", "uplink", "valley", "willow", "yonder", "zenith",
];

/// Picks one entry of a non-empty list.
pub fn pick<'a>(rng: &mut StdRng, list: &[&'a str]) -> &'a str {
    list[rng.random_range(0..list.len())]
}

pub fn first_name(rng: &mut StdRng) -> String {
    pick(rng, FIRST_NAMES).to_string()
}

pub fn middle_name(rng: &mut StdRng) -> String {
    pick(rng, MIDDLE_NAMES).to_string()
}

pub fn last_name(rng: &mut StdRng) -> String {
    pick(rng, LAST_NAMES).to_string()
}

pub fn company(rng: &mut StdRng) -> String {
    format!("{} {}", pick(rng, COMPANY_STEMS), pick(rng, COMPANY_SUFFIXES))
}

pub fn job(rng: &mut StdRng) -> String {
    pick(rng, JOBS).to_string()
}

pub fn city(rng: &mut StdRng) -> String {
    pick(rng, CITIES).to_string()
}

pub fn state(rng: &mut StdRng) -> String {
    pick(rng, STATES).to_string()
}

pub fn zip(rng: &mut StdRng) -> String {
    format!("{:05}", rng.random_range(501..99_951))
}

pub fn address(rng: &mut StdRng) -> String {
    let number = rng.random_range(1..9_999);
    let street = pick(rng, STREET_NAMES);
    let suffix = pick(rng, STREET_SUFFIXES);
    format!("{number} {street} {suffix}, {}, {}", city(rng), zip(rng))
}

/// An email address; `index` keeps addresses within one column distinct.
pub fn email(rng: &mut StdRng, index: usize) -> String {
    let first = pick(rng, FIRST_NAMES).to_lowercase();
    let last = pick(rng, LAST_NAMES).to_lowercase();
    let domain = pick(rng, DOMAINS);
    format!("{first}.{last}{index}@{domain}")
}

pub fn phone(rng: &mut StdRng) -> String {
    let area: u16 = rng.random_range(200..999);
    let exchange: u16 = rng.random_range(200..999);
    let subscriber: u16 = rng.random_range(1000..9999);
    format!("({area}) {exchange}-{subscriber}")
}

pub fn url(rng: &mut StdRng) -> String {
    let host = pick(rng, COMPANY_STEMS).to_lowercase();
    let domain = pick(rng, DOMAINS);
    format!("https://www.{host}.{domain}")
}

pub fn word(rng: &mut StdRng) -> String {
    pick(rng, WORDS).to_string()
}

/// A capitalized sentence of four to ten words ending in a period.
pub fn sentence(rng: &mut StdRng) -> String {
    let len = rng.random_range(4..=10);
    let words: Vec<&str> = (0..len).map(|_| pick(rng, WORDS)).collect();
    let text = words.join(" ");
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        format!("{}{}.", first.to_uppercase(), chars.as_str())
    })
}
