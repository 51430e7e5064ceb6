/// A built-in object every workspace carries.
pub struct StandardObject {
    pub name_singular: &'static str,
    pub label_plural: &'static str,
    pub standard_id: &'static str,
    pub fields: &'static [StandardField],
}

pub struct StandardField {
    pub name: &'static str,
    pub standard_id: &'static str,
}

const fn field(name: &'static str, standard_id: &'static str) -> StandardField {
    StandardField { name, standard_id }
}

pub const PERSON: StandardObject = StandardObject {
    name_singular: "person",
    label_plural: "People",
    standard_id: "20202020-e674-48e5-a542-72570eee7213",
    fields: &[
        field("name", "20202020-3875-44d5-8c33-a6239011cab8"),
        field("emails", "20202020-3c51-43fa-8b6e-af39e29368ab"),
        field("phones", "20202020-0638-448e-8825-439134618022"),
        field("city", "20202020-5243-4ffb-afc5-2c675da41346"),
        field("jobTitle", "20202020-b0d0-415a-bef9-640a26dacd9b"),
        field("createdAt", "20202020-4a6f-4f33-a8e1-7c2b5d1f9e04"),
    ],
};

pub const COMPANY: StandardObject = StandardObject {
    name_singular: "company",
    label_plural: "Companies",
    standard_id: "20202020-b374-4779-a561-80086cb2e17f",
    fields: &[
        field("name", "20202020-4d99-4e2e-a84c-4a27837b1ece"),
        field("domainName", "20202020-0c28-43d8-8ba5-3659924d3489"),
        field("address", "20202020-c5ce-4adc-b7b6-9c0979fc55e7"),
        field("employees", "20202020-8965-464a-8a75-74bafc152a0b"),
    ],
};

pub const AGENCY: StandardObject = StandardObject {
    name_singular: "agency",
    label_plural: "Agencies",
    standard_id: "20202020-a1c7-4e0b-9d2f-3b8e6f4c5a01",
    fields: &[
        field("name", "20202020-a1c7-4e0b-9d2f-3b8e6f4c5a02"),
        field("address", "20202020-a1c7-4e0b-9d2f-3b8e6f4c5a03"),
        field("phone", "20202020-a1c7-4e0b-9d2f-3b8e6f4c5a04"),
        field("email", "20202020-a1c7-4e0b-9d2f-3b8e6f4c5a05"),
    ],
};

pub const PROPERTY: StandardObject = StandardObject {
    name_singular: "property",
    label_plural: "Properties",
    standard_id: "20202020-b2d8-4f1c-8e3a-4c9f7a5d6b01",
    fields: &[
        field("name", "20202020-b2d8-4f1c-8e3a-4c9f7a5d6b02"),
        field("address", "20202020-b2d8-4f1c-8e3a-4c9f7a5d6b03"),
        field("price", "20202020-b2d8-4f1c-8e3a-4c9f7a5d6b04"),
        field("surface", "20202020-b2d8-4f1c-8e3a-4c9f7a5d6b05"),
        field("rooms", "20202020-b2d8-4f1c-8e3a-4c9f7a5d6b06"),
        field("status", "20202020-b2d8-4f1c-8e3a-4c9f7a5d6b07"),
        field("propertyType", "20202020-b2d8-4f1c-8e3a-4c9f7a5d6b08"),
        field("agency", "20202020-b2d8-4f1c-8e3a-4c9f7a5d6b09"),
    ],
};

pub const PUBLICATION: StandardObject = StandardObject {
    name_singular: "publication",
    label_plural: "Publications",
    standard_id: "20202020-c3e9-4a2d-9f4b-5dae8b6e7c01",
    fields: &[
        field("title", "20202020-c3e9-4a2d-9f4b-5dae8b6e7c02"),
        field("platform", "20202020-c3e9-4a2d-9f4b-5dae8b6e7c03"),
        field("stage", "20202020-c3e9-4a2d-9f4b-5dae8b6e7c04"),
        field("property", "20202020-c3e9-4a2d-9f4b-5dae8b6e7c05"),
        field("publishedAt", "20202020-c3e9-4a2d-9f4b-5dae8b6e7c06"),
    ],
};

pub const BUYER_LEAD: StandardObject = StandardObject {
    name_singular: "buyerLead",
    label_plural: "Buyer Leads",
    standard_id: "20202020-d4fa-4b3e-8a5c-6ebf9c7f8d01",
    fields: &[
        field("name", "20202020-d4fa-4b3e-8a5c-6ebf9c7f8d02"),
        field("email", "20202020-d4fa-4b3e-8a5c-6ebf9c7f8d03"),
        field("phone", "20202020-d4fa-4b3e-8a5c-6ebf9c7f8d04"),
        field("message", "20202020-d4fa-4b3e-8a5c-6ebf9c7f8d05"),
        field("property", "20202020-d4fa-4b3e-8a5c-6ebf9c7f8d06"),
        field("source", "20202020-d4fa-4b3e-8a5c-6ebf9c7f8d07"),
        field("stage", "20202020-d4fa-4b3e-8a5c-6ebf9c7f8d08"),
    ],
};

pub const OPPORTUNITY: StandardObject = StandardObject {
    name_singular: "opportunity",
    label_plural: "Opportunities",
    standard_id: "20202020-9549-49dd-b2b2-883999db8938",
    fields: &[
        field("name", "20202020-8609-4f65-a2d9-44009eb422b5"),
        field("amount", "20202020-583e-4642-8533-db761d5fa82f"),
        field("closeDate", "20202020-527e-44d6-b1ac-c4158d307b97"),
        field("stage", "20202020-6f76-477d-8551-28cd65b2b4b9"),
        field("company", "20202020-cbac-457e-b565-adece5fc815f"),
        field("pointOfContact", "20202020-8dfb-42fc-92b6-01afb759ed16"),
    ],
};

pub const NOTE: StandardObject = StandardObject {
    name_singular: "note",
    label_plural: "Notes",
    standard_id: "20202020-0b00-45cd-b6f6-6cd806fc6804",
    fields: &[
        field("title", "20202020-faeb-4c76-8ba6-ccbb0b4a965f"),
        field("body", "20202020-e63d-4e70-95be-a78cd9abe7ef"),
    ],
};

pub const TASK: StandardObject = StandardObject {
    name_singular: "task",
    label_plural: "Tasks",
    standard_id: "20202020-1ba1-48ba-bc83-ef7e5990ed10",
    fields: &[
        field("title", "20202020-b386-4cb7-aa5a-08d4a4d92680"),
        field("body", "20202020-ce13-43f4-8782-245d8bb2ee05"),
        field("dueAt", "20202020-fd99-40da-951b-4cb9a352fce3"),
        field("status", "20202020-70bc-48f9-89c5-6aa730b151e0"),
        field("assignee", "20202020-065a-4f42-a906-e20422c1753f"),
    ],
};

pub const WORKSPACE_MEMBER: StandardObject = StandardObject {
    name_singular: "workspaceMember",
    label_plural: "Members",
    standard_id: "20202020-3319-4234-a34c-82d5c0e881a6",
    fields: &[
        field("name", "20202020-e914-43a6-9c26-3603c59065f4"),
        field("userEmail", "20202020-4c5f-4e09-bebc-9e624e21ecf4"),
        field("locale", "20202020-10f6-4df9-8d6f-a760b65bd800"),
    ],
};

pub const STANDARD_OBJECTS: &[StandardObject] = &[
    PERSON,
    COMPANY,
    AGENCY,
    PROPERTY,
    PUBLICATION,
    BUYER_LEAD,
    OPPORTUNITY,
    NOTE,
    TASK,
    WORKSPACE_MEMBER,
];

/// Feature flags every template starts with.
pub const DEFAULT_FEATURE_FLAGS: &[(&str, bool)] = &[
    ("IS_PUBLICATION_SYNC_ENABLED", true),
    ("IS_PDF_EXPORT_ENABLED", true),
    ("IS_EMAIL_SENDING_ENABLED", true),
    ("IS_WORKFLOW_ENABLED", false),
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_standard_ids_are_unique() {
        let mut seen = HashSet::new();
        for object in STANDARD_OBJECTS {
            assert!(seen.insert(object.standard_id), "{}", object.name_singular);
            for field in object.fields {
                assert!(
                    seen.insert(field.standard_id),
                    "{}.{}",
                    object.name_singular,
                    field.name
                );
            }
        }
    }

    #[test]
    fn test_object_names_are_unique() {
        let names: HashSet<_> = STANDARD_OBJECTS.iter().map(|o| o.name_singular).collect();
        assert_eq!(names.len(), STANDARD_OBJECTS.len());
    }
}
