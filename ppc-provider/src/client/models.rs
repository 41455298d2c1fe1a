//! Response models of the Power Systems cloud API
//!
//! Every scalar is optional: a missing field means "not set", which the
//! data sources must keep distinct from a zero value.

use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    #[serde(rename = "networkID")]
    pub network_id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub network_type: Option<String>,
    #[serde(rename = "vlanID")]
    pub vlan_id: Option<i64>,
    pub cidr: Option<String>,
    pub gateway: Option<String>,
    #[serde(default)]
    pub dns_servers: Vec<String>,
    pub ip_address_metrics: Option<IpAddressMetrics>,
    pub jumbo: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IpAddressMetrics {
    pub available: Option<f64>,
    pub used: Option<f64>,
    pub utilization: Option<f64>,
    pub total: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Networks {
    #[serde(default)]
    pub networks: Vec<NetworkReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NetworkReference {
    #[serde(rename = "networkID")]
    pub network_id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub network_type: Option<String>,
    #[serde(rename = "vlanID")]
    pub vlan_id: Option<i64>,
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NetworkPorts {
    #[serde(default)]
    pub ports: Vec<NetworkPort>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkPort {
    #[serde(rename = "portID")]
    pub port_id: Option<String>,
    pub status: Option<String>,
    pub href: Option<String>,
    pub ip_address: Option<String>,
    pub mac_address: Option<String>,
    #[serde(rename = "externalIP")]
    pub external_ip: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Volumes {
    #[serde(default)]
    pub volumes: Vec<VolumeReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeReference {
    #[serde(rename = "volumeID")]
    pub volume_id: Option<String>,
    pub name: Option<String>,
    pub state: Option<String>,
    pub href: Option<String>,
    pub size: Option<f64>,
    pub disk_type: Option<String>,
    pub volume_pool: Option<String>,
    pub shareable: Option<bool>,
    pub bootable: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeGroup {
    pub id: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub replication_status: Option<String>,
    pub consistency_group_name: Option<String>,
    pub status_description: Option<StatusDescription>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatusDescription {
    #[serde(default)]
    pub errors: Vec<StatusDescriptionError>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatusDescriptionError {
    pub key: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "volIDs", default)]
    pub vol_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SshKey {
    pub name: Option<String>,
    pub ssh_key: Option<String>,
    pub creation_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Images {
    #[serde(default)]
    pub images: Vec<ImageReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageReference {
    #[serde(rename = "imageID")]
    pub image_id: Option<String>,
    pub name: Option<String>,
    pub href: Option<String>,
    pub state: Option<String>,
    pub storage_type: Option<String>,
    pub storage_pool: Option<String>,
    pub specifications: Option<ImageSpecifications>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSpecifications {
    pub image_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DhcpServer {
    pub id: Option<String>,
    pub status: Option<String>,
    pub network: Option<DhcpServerNetwork>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DhcpServerNetwork {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageTypeCapacity {
    pub storage_type: Option<String>,
    pub maximum_storage_allocation: Option<MaximumStorageAllocation>,
    #[serde(default)]
    pub storage_pools_capacity: Vec<StoragePoolCapacity>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaximumStorageAllocation {
    pub max_allocation_size: Option<i64>,
    pub storage_pool: Option<String>,
    pub storage_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoragePoolCapacity {
    pub max_allocation_size: Option<i64>,
    pub pool_name: Option<String>,
    pub storage_type: Option<String>,
    pub total_capacity: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn network_keeps_missing_fields_unset() {
        let network: Network = serde_json::from_value(json!({
            "networkID": "nw-9",
            "cidr": "10.0.0.0/24",
            "type": "vlan",
            "ipAddressMetrics": {"available": 250}
        }))
        .unwrap();

        assert_eq!(network.network_id.as_deref(), Some("nw-9"));
        assert_eq!(network.network_type.as_deref(), Some("vlan"));
        assert_eq!(network.vlan_id, None);
        assert_eq!(network.jumbo, None);
        assert!(network.dns_servers.is_empty());
        let metrics = network.ip_address_metrics.unwrap();
        assert_eq!(metrics.available, Some(250.0));
        assert_eq!(metrics.used, None);
    }

    #[test]
    fn volume_fields_are_renamed() {
        let volumes: Volumes = serde_json::from_value(json!({
            "volumes": [{
                "volumeID": "v1",
                "name": "boot",
                "state": "in-use",
                "href": "/v/v1",
                "size": 20,
                "diskType": "tier1",
                "volumePool": "Tier1-Flash-1",
                "shareable": false,
                "bootable": true
            }]
        }))
        .unwrap();

        assert_eq!(
            volumes.volumes,
            vec![VolumeReference {
                volume_id: Some("v1".to_string()),
                name: Some("boot".to_string()),
                state: Some("in-use".to_string()),
                href: Some("/v/v1".to_string()),
                size: Some(20.0),
                disk_type: Some("tier1".to_string()),
                volume_pool: Some("Tier1-Flash-1".to_string()),
                shareable: Some(false),
                bootable: Some(true),
            }]
        );
    }

    #[test]
    fn port_fields_are_renamed() {
        let ports: NetworkPorts = serde_json::from_value(json!({
            "ports": [{
                "portID": "p1",
                "status": "ACTIVE",
                "href": "/ports/p1",
                "ipAddress": "10.0.0.5",
                "macAddress": "fa:16:3e:00:00:01",
                "externalIP": "169.48.0.5",
                "description": "eth0"
            }]
        }))
        .unwrap();

        assert_eq!(
            ports.ports,
            vec![NetworkPort {
                port_id: Some("p1".to_string()),
                status: Some("ACTIVE".to_string()),
                href: Some("/ports/p1".to_string()),
                ip_address: Some("10.0.0.5".to_string()),
                mac_address: Some("fa:16:3e:00:00:01".to_string()),
                external_ip: Some("169.48.0.5".to_string()),
                description: Some("eth0".to_string()),
            }]
        );
    }

    #[test]
    fn image_fields_are_renamed() {
        let images: Images = serde_json::from_value(json!({
            "images": [{
                "imageID": "img-1",
                "name": "7200-05-01",
                "href": "/images/img-1",
                "state": "active",
                "storageType": "tier3",
                "storagePool": "Tier3-Flash-1",
                "specifications": {"imageType": "stock"}
            }]
        }))
        .unwrap();

        assert_eq!(
            images.images,
            vec![ImageReference {
                image_id: Some("img-1".to_string()),
                name: Some("7200-05-01".to_string()),
                href: Some("/images/img-1".to_string()),
                state: Some("active".to_string()),
                storage_type: Some("tier3".to_string()),
                storage_pool: Some("Tier3-Flash-1".to_string()),
                specifications: Some(ImageSpecifications {
                    image_type: Some("stock".to_string()),
                }),
            }]
        );
    }

    #[test]
    fn storage_capacity_fields_are_renamed() {
        let capacity: StorageTypeCapacity = serde_json::from_value(json!({
            "storageType": "tier1",
            "maximumStorageAllocation": {
                "maxAllocationSize": 10240,
                "storagePool": "Tier1-Flash-1",
                "storageType": "tier1"
            },
            "storagePoolsCapacity": [{
                "maxAllocationSize": 10240,
                "poolName": "Tier1-Flash-1",
                "storageType": "tier1",
                "totalCapacity": 40960
            }]
        }))
        .unwrap();

        assert_eq!(
            capacity,
            StorageTypeCapacity {
                storage_type: Some("tier1".to_string()),
                maximum_storage_allocation: Some(MaximumStorageAllocation {
                    max_allocation_size: Some(10240),
                    storage_pool: Some("Tier1-Flash-1".to_string()),
                    storage_type: Some("tier1".to_string()),
                }),
                storage_pools_capacity: vec![StoragePoolCapacity {
                    max_allocation_size: Some(10240),
                    pool_name: Some("Tier1-Flash-1".to_string()),
                    storage_type: Some("tier1".to_string()),
                    total_capacity: Some(40960),
                }],
            }
        );
    }

    #[test]
    fn volume_group_status_errors() {
        let group: VolumeGroup = serde_json::from_value(json!({
            "id": "vg-1",
            "statusDescription": {
                "errors": [{"key": "k", "message": "m", "volIDs": ["v1", "v2"]}]
            }
        }))
        .unwrap();

        let errors = group.status_description.unwrap().errors;
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].vol_ids, vec!["v1", "v2"]);
    }
}
