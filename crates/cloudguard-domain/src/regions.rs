//! Location enumeration per resource type and deployment cloud.

use cloudguard_types::{Cloud, LocationId};

const PUBLIC_REGIONS: &[&str] = &[
    "eastus",
    "eastus2",
    "westus",
    "westus2",
    "westus3",
    "centralus",
    "northcentralus",
    "southcentralus",
    "westcentralus",
    "canadacentral",
    "canadaeast",
    "brazilsouth",
    "northeurope",
    "westeurope",
    "uksouth",
    "ukwest",
    "francecentral",
    "germanywestcentral",
    "norwayeast",
    "switzerlandnorth",
    "swedencentral",
    "eastasia",
    "southeastasia",
    "japaneast",
    "japanwest",
    "australiaeast",
    "australiasoutheast",
    "centralindia",
    "southindia",
    "koreacentral",
    "southafricanorth",
    "uaenorth",
];

const GOVERNMENT_REGIONS: &[&str] = &[
    "usgovvirginia",
    "usgovtexas",
    "usgovarizona",
    "usdodeast",
    "usdodcentral",
];

/// Resource types collected once per subscription rather than per region.
const GLOBAL_RESOURCE_TYPES: &[&str] = &[
    "subscriptions",
    "resourceGroups",
    "roleDefinitions",
    "policyAssignments",
    "managementGroups",
];

/// Ordered locations the collector gathers `resource_type` for in `cloud`.
pub fn locations_for(resource_type: &str, cloud: Cloud) -> Vec<LocationId> {
    if GLOBAL_RESOURCE_TYPES.contains(&resource_type) {
        return vec![LocationId::global()];
    }
    let regions = match cloud {
        Cloud::Public => PUBLIC_REGIONS,
        Cloud::Government => GOVERNMENT_REGIONS,
    };
    regions.iter().map(|r| LocationId::new(r)).collect()
}
