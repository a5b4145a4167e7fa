//! Professional certifications.

/// Issuing organization; selects the badge artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Issuer {
    Microsoft,
    Oracle,
    GitHub,
    Cisco,
    Fortinet,
}

impl Issuer {
    /// Key used for the badge asset.
    #[must_use]
    pub const fn logo_key(self) -> &'static str {
        match self {
            Self::Microsoft => "microsoft",
            Self::Oracle => "oracle",
            Self::GitHub => "github",
            Self::Cisco => "cisco",
            Self::Fortinet => "fortinet",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Certification {
    pub id: u32,
    pub name: &'static str,
    /// Display name of the issuer, which may differ from the logo family.
    pub issuer_name: &'static str,
    pub issuer: Issuer,
    pub credential: &'static str,
    pub year: u16,
    pub url: &'static str,
}

impl Certification {
    /// Accessible label for the verification link.
    #[must_use]
    pub fn verify_label(&self) -> String {
        format!("Verify {} credential (opens in new tab)", self.name)
    }
}

/// Fundamentals first within each issuer.
pub const CERTIFICATIONS: [Certification; 11] = [
    Certification {
        id: 1,
        name: "Azure Fundamentals",
        issuer_name: "Microsoft",
        issuer: Issuer::Microsoft,
        credential: "AZ-900",
        year: 2026,
        url: "https://learn.microsoft.com/en-us/certifications/azure-fundamentals/",
    },
    Certification {
        id: 2,
        name: "Azure Administrator Associate",
        issuer_name: "Microsoft",
        issuer: Issuer::Microsoft,
        credential: "AZ-104",
        year: 2026,
        url: "https://learn.microsoft.com/en-us/certifications/azure-administrator/",
    },
    Certification {
        id: 3,
        name: "Azure Security Engineer Associate",
        issuer_name: "Microsoft",
        issuer: Issuer::Microsoft,
        credential: "AZ-500",
        year: 2026,
        url: "https://learn.microsoft.com/en-us/certifications/azure-security-engineer/",
    },
    Certification {
        id: 4,
        name: "Azure AI Engineer Associate",
        issuer_name: "Microsoft",
        issuer: Issuer::Microsoft,
        credential: "AI-102",
        year: 2026,
        url: "https://learn.microsoft.com/en-us/certifications/azure-ai-engineer/",
    },
    Certification {
        id: 5,
        name: "Multicloud Architect Professional",
        issuer_name: "Oracle Cloud Infrastructure",
        issuer: Issuer::Oracle,
        credential: "OCI Certified",
        year: 2025,
        url: "https://catalog-education.oracle.com/pls/certview/sharebadge?id=A519F3F95BE2E8E2682BEFE2B21E3487BDC35F9B420348CC55D7AB7C1FD97B5C",
    },
    Certification {
        id: 6,
        name: "GitHub Foundations",
        issuer_name: "GitHub",
        issuer: Issuer::GitHub,
        credential: "Certified",
        year: 2025,
        url: "https://www.credly.com/badges/4a490867-043e-4076-ae56-02fe9da748b1/linked_in_profile",
    },
    Certification {
        id: 7,
        name: "Computer Hardware Basics",
        issuer_name: "Cisco",
        issuer: Issuer::Cisco,
        credential: "Hardware",
        year: 2025,
        url: "https://www.credly.com/badges/50a3f025-118e-4b43-aab3-d45c2526ca67/linked_in_profile",
    },
    Certification {
        id: 8,
        name: "Introduction to Cybersecurity",
        issuer_name: "Cisco",
        issuer: Issuer::Cisco,
        credential: "Security",
        year: 2025,
        url: "https://www.credly.com/badges/b6168c14-707f-446b-92f2-1ba956a874cd/linked_in_profile",
    },
    Certification {
        id: 9,
        name: "Network Addressing & Troubleshooting",
        issuer_name: "Cisco",
        issuer: Issuer::Cisco,
        credential: "Networking",
        year: 2025,
        url: "https://www.credly.com/badges/b1ecdd7b-4b55-49c7-9594-ad5348cc13f3/linked_in_profile",
    },
    Certification {
        id: 10,
        name: "Certified Cybersecurity Associate",
        issuer_name: "Fortinet",
        issuer: Issuer::Fortinet,
        credential: "FCA",
        year: 2025,
        url: "https://www.credly.com/badges/843794a2-1105-4d65-9a61-2926792c64b5/linked_in_profile",
    },
    Certification {
        id: 11,
        name: "FortiGate 7.6 Operator",
        issuer_name: "Fortinet",
        issuer: Issuer::Fortinet,
        credential: "Operator",
        year: 2025,
        url: "https://www.credly.com/badges/656fad4f-e51a-46a1-934b-37885f64380b/linked_in_profile",
    },
];
