//! Word lists behind the synthetic values.
//!
//! The lists are deliberately small; uniqueness pressure is handled by
//! [`super::UniqueAssigner`], not by the corpus size.

pub const FIRST_NAMES: &[&str] = &[
    "Aaron", "Abigail", "Adrian", "Alice", "Amara", "Andre", "Anika", "Beatrix", "Benjamin",
    "Bianca", "Caleb", "Camila", "Carmen", "Cyrus", "Dahlia", "Damian", "Delia", "Desmond",
    "Eden", "Elias", "Elena", "Emmett", "Esme", "Felix", "Fiona", "Frida", "Gideon", "Greta",
    "Hana", "Harvey", "Hugo", "Imani", "Ingrid", "Isaac", "Ivy", "Jasper", "Joelle", "Jonah",
    "Juno", "Kai", "Keira", "Kenji", "Lena", "Levi", "Lorenzo", "Lucia", "Malik", "Maren",
    "Mateo", "Mira", "Nadia", "Nico", "Nora", "Odette", "Omar", "Orla", "Pablo", "Petra",
    "Quinn", "Rafael", "Rhea", "Rosalind", "Samir", "Selma", "Silas", "Talia", "Theo", "Tova",
    "Ulrich", "Vera", "Victor", "Wanda", "Wes", "Xavier", "Yara", "Yusuf", "Zadie", "Zane",
];

pub const LAST_NAMES: &[&str] = &[
    "Abbott", "Adeyemi", "Alvarez", "Bauer", "Bergstrom", "Bishop", "Brennan", "Castillo",
    "Chandler", "Dalton", "Delacroix", "Eriksen", "Esposito", "Fairbanks", "Fischer", "Fontaine",
    "Gallagher", "Garrido", "Hale", "Haraldsen", "Holloway", "Ibarra", "Iverson", "Jablonski",
    "Jensen", "Kaplan", "Kowalski", "Lachance", "Lindqvist", "Lorenz", "Madsen", "Marchetti",
    "Mendoza", "Nakamura", "Navarro", "Novak", "Okafor", "Olsen", "Ortega", "Pacheco", "Petrov",
    "Quintero", "Ramirez", "Rasmussen", "Rinaldi", "Sandoval", "Sato", "Sorensen", "Takahashi",
    "Thornton", "Trujillo", "Underwood", "Valdez", "Varga", "Vasquez", "Whitaker", "Winslow",
    "Yamamoto", "Yilmaz", "Zamora", "Zeller",
];

pub const NAME_PREFIXES: &[&str] = &["Dr.", "Mr.", "Mrs.", "Ms.", "Mx."];

pub const NAME_SUFFIXES: &[&str] = &["Jr.", "Sr.", "II", "III", "PhD", "MD"];

pub const ADJECTIVES: &[&str] = &[
    "agile", "amber", "ancient", "bold", "brave", "bright", "calm", "candid", "clever", "cobalt",
    "cosmic", "crimson", "daring", "deep", "eager", "early", "electric", "emerald", "fair",
    "fancy", "fierce", "gentle", "giant", "golden", "grand", "happy", "hidden", "humble", "icy",
    "indigo", "jolly", "keen", "kind", "lively", "lucky", "lunar", "mellow", "mighty", "misty",
    "modern", "noble", "north", "odd", "olive", "orange", "patient", "plain", "polar", "proud",
    "quick", "quiet", "rapid", "rare", "royal", "rustic", "scarlet", "silent", "silver", "smart",
    "solar", "steady", "stellar", "swift", "tidy", "true", "urban", "vast", "velvet", "vivid",
    "warm", "west", "wild", "wise", "witty", "young", "zesty",
];

pub const NOUNS: &[&str] = &[
    "anchor", "arrow", "aspen", "badger", "beacon", "birch", "bison", "breeze", "brook", "canyon",
    "cedar", "cliff", "comet", "coral", "crane", "creek", "dawn", "delta", "ember", "falcon",
    "fern", "field", "fjord", "forge", "fox", "garden", "glacier", "grove", "harbor", "hawk",
    "heron", "hill", "island", "jaguar", "juniper", "kestrel", "lagoon", "lantern", "lark",
    "maple", "meadow", "mesa", "moose", "nebula", "oak", "orbit", "otter", "owl", "panther",
    "peak", "pine", "prairie", "quarry", "raven", "reef", "ridge", "river", "robin", "sage",
    "spruce", "stone", "summit", "thistle", "tiger", "timber", "tundra", "valley", "vine",
    "walnut", "willow", "wolf", "wren", "yarrow", "zephyr",
];

pub const COMPANY_SUFFIXES: &[&str] = &[
    "Inc", "LLC", "Group", "Partners", "Holdings", "Labs", "Cooperative", "Ltd",
];

pub const STREET_NAMES: &[&str] = &[
    "Ash", "Bluebell", "Canyon View", "Chestnut", "Cottonwood", "Eagle Crest", "Elm", "Foxglove",
    "Granite", "Hawthorn", "Highland", "Juniper", "Lakeview", "Linden", "Magnolia", "Maple",
    "Meadowlark", "Mill", "Oak Hollow", "Orchard", "Pinecrest", "Quail Run", "Redwood", "Ridge",
    "Riverside", "Sagebrush", "Spring", "Sunset", "Sycamore", "Timberline", "Valley", "Willow",
];

pub const STREET_SUFFIXES: &[&str] = &[
    "St", "Ave", "Blvd", "Ct", "Dr", "Ln", "Pkwy", "Pl", "Rd", "Way",
];

pub const SECONDARY_UNITS: &[&str] = &["Apt", "Suite", "Unit", "Bldg"];

pub const CITIES: &[&str] = &[
    "Ashford", "Bellmont", "Brookhaven", "Cedar Falls", "Clearwater", "Crestview", "Eastport",
    "Fairview", "Glenwood", "Greenfield", "Harborview", "Hillsdale", "Kingsbridge", "Lakeside",
    "Maplewood", "Millbrook", "New Carlisle", "Northgate", "Oakridge", "Pine Bluff",
    "Port Wellington", "Ridgefield", "Riverton", "Silver Springs", "Springvale", "Stonebridge",
    "Sunnyvale", "Westfield", "Willow Creek", "Woodhaven",
];

pub const SUBDIVISION_CODES: &[&str] = &[
    "US-AK", "US-AL", "US-AR", "US-AZ", "US-CA", "US-CO", "US-CT", "US-DE", "US-FL", "US-GA",
    "US-HI", "US-IA", "US-ID", "US-IL", "US-IN", "US-KS", "US-KY", "US-LA", "US-MA", "US-MD",
    "US-ME", "US-MI", "US-MN", "US-MO", "US-MS", "US-MT", "US-NC", "US-ND", "US-NE", "US-NH",
    "US-NJ", "US-NM", "US-NV", "US-NY", "US-OH", "US-OK", "US-OR", "US-PA", "US-RI", "US-SC",
    "US-SD", "US-TN", "US-TX", "US-UT", "US-VA", "US-VT", "US-WA", "US-WI", "US-WV", "US-WY",
];
