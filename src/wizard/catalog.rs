pub const COMMON_SYMPTOMS: [&str; 18] = [
    "Headache",
    "Fever",
    "Cough",
    "Fatigue",
    "Sore Throat",
    "Shortness of Breath",
    "Muscle Pain",
    "Loss of Taste or Smell",
    "Nausea",
    "Diarrhea",
    "Chest Pain",
    "Runny Nose",
    "Dizziness",
    "Abdominal Pain",
    "Rash",
    "Joint Pain",
    "Chills",
    "Vomiting",
];

pub const DURATION_OPTIONS: [&str; 5] = [
    "Less than 24 hours",
    "1-3 days",
    "4-7 days",
    "1-2 weeks",
    "More than 2 weeks",
];

pub const SEVERITY_OPTIONS: [&str; 4] = ["Mild", "Moderate", "Severe", "Very Severe"];
