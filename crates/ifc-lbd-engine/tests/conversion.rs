// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end conversion tests

use ifc_lbd_engine::{
    convert, AuditRow, ConversionOptions, ConvertError, DanglingReference, EntityFilter,
};
use ifc_lbd_engine::namespace::PROPS;
use ifc_lbd_model::{
    AttributeSet, BuildingEntity, Category, EntityId, InMemoryModel, ModelBuilder,
};
use pretty_assertions::assert_eq;

const BASE: &str = "http://example.org/lbd/";

const GUID_BUILDING: &str = "0$3AJYd51AFAvN3gNnR1h1";
const GUID_STOREY: &str = "2O2Fr$t4X7Zf8NOew3FNr2";
const GUID_ELEMENT: &str = "1xS3BCk291UvhgP2a6eflL";
const GUID_HOSTED: &str = "3vB2YO$MX4xv5uCqZZG05x";
const GUID_SPACE: &str = "0K7w7JN$X1Ffkrr1QiLXG5";
const GUID_INTERFACE: &str = "1hqIFTRjfV6AWq_bMtnZwI";

fn options() -> ConversionOptions {
    ConversionOptions::new().with_base_uri(BASE)
}

/// Building B1 → Storey S1 → one wall with a height attribute
fn small_model() -> InMemoryModel {
    ModelBuilder::new()
        .entity(
            BuildingEntity::new(10, Category::Building)
                .with_global_id(GUID_BUILDING)
                .with_name("B1"),
        )
        .entity(
            BuildingEntity::new(20, Category::Storey)
                .with_global_id(GUID_STOREY)
                .with_name("S1"),
        )
        .entity(
            BuildingEntity::new(30, Category::Element)
                .with_global_id(GUID_ELEMENT)
                .with_ifc_class("IfcWall")
                .with_attribute_set(
                    AttributeSet::new("Dimensions").with("Dpp_Dim_Height_Mm", 200.0),
                ),
        )
        .decompose(10, [20])
        .contain(20, [30])
        .build()
        .unwrap()
}

#[test]
fn test_end_to_end_scenario() {
    let conversion = convert(&small_model(), &options()).unwrap();
    let turtle = conversion.to_turtle();

    assert!(turtle.starts_with(
        "# baseURI: http://example.org/lbd/\n@prefix inst: <http://example.org/lbd/> .\n"
    ));
    assert!(turtle.contains("inst: rdf:type <http://www.w3.org/2002/07/owl#Ontology> .\n"));
    assert!(turtle.contains(
        "inst:building_10\n\
         \ta bot:Building ;\n\
         \trdfs:label \"B1\"^^xsd:string ;\n\
         \tbot:hasGuid \"3f0ca4e29c504a3cae570ea5f16c1ac1\"^^xsd:string ;\n\
         \tprops:hasCompressedGuid \"0$3AJYd51AFAvN3gNnR1h1\"^^xsd:string ;\n\
         \tbot:hasStorey inst:storey_20 .\n\n"
    ));
    assert!(turtle.contains(
        "inst:storey_20\n\
         \ta bot:Storey ;\n\
         \trdfs:label \"S1\"^^xsd:string ;\n\
         \tbot:hasGuid \"9808fd7fdc48478e9217628e833d7d42\"^^xsd:string ;\n\
         \tprops:hasCompressedGuid \"2O2Fr$t4X7Zf8NOew3FNr2\"^^xsd:string ;\n\
         \tbot:containsElement inst:element_30 .\n\n"
    ));
    assert!(turtle.contains(
        "inst:element_30\n\
         \ta bot:Element ;\n\
         \tbot:hasGuid \"7b7032ccb822417b9aea642906a29bd5\"^^xsd:string ;\n\
         \tprops:hasCompressedGuid \"1xS3BCk291UvhgP2a6eflL\"^^xsd:string ;\n\
         \tprops:Dpp_Dim_Height_Mm \"200.0\"^^xsd:double .\n\n"
    ));

    assert_eq!(
        conversion.audit.rows(),
        &[AuditRow {
            element_id: "element_30".to_string(),
            element_type: "IfcWall".to_string(),
            element_name: String::new(),
            parameter: "Dpp_Dim_Height_Mm".to_string(),
            value: "200.0".to_string(),
            data_type: "double".to_string(),
            unit: "mm".to_string(),
        }]
    );
}

#[test]
fn test_blocks_follow_category_order() {
    let conversion = convert(&small_model(), &options()).unwrap();
    let nodes: Vec<&str> = conversion.graph.blocks.iter().map(|b| b.node.as_str()).collect();
    assert_eq!(nodes, vec!["building_10", "storey_20", "element_30"]);

    let report = &conversion.report;
    assert_eq!(report.node_count(), 3);
    assert_eq!(report.nodes.get(&Category::Site), Some(&0));
    assert_eq!(report.audit_rows, 1);
    assert!(report.warnings.is_empty());
    assert_eq!(report.triples, conversion.graph.triple_count());
}

#[test]
fn test_one_type_and_guid_per_node() {
    let conversion = convert(&small_model(), &options()).unwrap();
    for block in &conversion.graph.blocks {
        assert_eq!(block.with_predicate("a").count(), 1, "{}", block.node);
        assert_eq!(block.with_predicate("bot:hasGuid").count(), 1, "{}", block.node);
    }
}

#[test]
fn test_integer_literal_keeps_lexical_form() {
    let model = ModelBuilder::new()
        .entity(
            BuildingEntity::new(1, Category::Space)
                .with_global_id(GUID_SPACE)
                .with_attribute_set(
                    AttributeSet::new("Pset_SpaceCommon")
                        .with("Occupants", 12i64)
                        .with("IsExternal", false)
                        .with("Reference", "A\n12"),
                ),
        )
        .build()
        .unwrap();

    let turtle = convert(&model, &options()).unwrap().to_turtle();
    assert!(turtle.contains("\tprops:Occupants \"12\"^^xsd:int ;\n"));
    assert!(turtle.contains("\tprops:Isexternal \"false\"^^xsd:boolean ;\n"));
    assert!(turtle.contains("\tprops:Reference \"A, 12\"^^xsd:string .\n"));
}

#[test]
fn test_fixed_base_uri_is_idempotent() {
    let model = small_model();
    let first = convert(&model, &options()).unwrap();
    let second = convert(&model, &options()).unwrap();
    assert_eq!(first.to_turtle(), second.to_turtle());
    assert_eq!(first.audit, second.audit);
}

#[test]
fn test_disabling_category_removes_only_its_nodes() {
    let model = small_model();
    let full = convert(&model, &options()).unwrap();
    let filtered = convert(
        &model,
        &options().with_filter(EntityFilter::excluding([Category::Element])),
    )
    .unwrap();

    let nodes: Vec<&str> = filtered.graph.blocks.iter().map(|b| b.node.as_str()).collect();
    assert_eq!(nodes, vec!["building_10", "storey_20"]);
    assert_eq!(filtered.graph.block("building_10"), full.graph.block("building_10"));

    let storey = filtered.graph.block("storey_20").unwrap();
    assert_eq!(storey.with_predicate("bot:containsElement").count(), 0);
    assert!(filtered.audit.is_empty());
    assert!(filtered.report.warnings.contains(&DanglingReference::DisabledTarget {
        source: Category::Storey,
        predicate: "bot:containsElement",
        target: Category::Element,
    }));
}

#[test]
fn test_guid_only_block() {
    let model = ModelBuilder::new()
        .entity(BuildingEntity::new(7, Category::Zone).with_global_id(GUID_BUILDING))
        .build()
        .unwrap();

    let conversion = convert(&model, &options()).unwrap();
    let turtle = conversion.to_turtle();
    assert!(turtle.ends_with(
        "inst:zone_7\n\
         \ta bot:Zone ;\n\
         \tbot:hasGuid \"3f0ca4e29c504a3cae570ea5f16c1ac1\"^^xsd:string ;\n\
         \tprops:hasCompressedGuid \"0$3AJYd51AFAvN3gNnR1h1\"^^xsd:string .\n\n"
    ));
    assert!(!turtle.contains("rdfs:label"));
    assert!(!turtle.contains("rdfs:comment"));
}

#[test]
fn test_missing_guid_fails_run() {
    let model = ModelBuilder::new()
        .entity(BuildingEntity::new(1, Category::Site).with_global_id(GUID_BUILDING))
        .entity(BuildingEntity::new(2, Category::Building).with_name("No id"))
        .build()
        .unwrap();

    match convert(&model, &options()) {
        Err(ConvertError::DataIntegrity { node, .. }) => assert_eq!(node, "building_2"),
        other => panic!("expected data integrity error, got {:?}", other.map(|c| c.report)),
    }
}

#[test]
fn test_invalid_guid_fails_run() {
    let model = ModelBuilder::new()
        .entity(BuildingEntity::new(1, Category::Site).with_global_id("not-a-guid"))
        .build()
        .unwrap();

    let err = convert(&model, &options()).unwrap_err();
    assert!(matches!(err, ConvertError::DataIntegrity { ref node, .. } if node == "site_1"));
}

#[test]
fn test_duplicate_hosting_collapses() {
    // Two openings in the wall share the same door
    let model = ModelBuilder::new()
        .entity(BuildingEntity::new(1, Category::Element).with_global_id(GUID_ELEMENT))
        .entity(BuildingEntity::new(2, Category::Element).with_global_id(GUID_HOSTED))
        .void(1, 100)
        .void(1, 101)
        .fill(100, 2)
        .fill(101, 2)
        .build()
        .unwrap();

    let conversion = convert(&model, &options()).unwrap();
    let wall = conversion.graph.block("element_1").unwrap();
    assert_eq!(wall.with_predicate("bot:hostsElement").count(), 1);
    assert!(conversion
        .to_turtle()
        .contains("\tbot:hostsElement inst:element_2 .\n"));
}

#[test]
fn test_dangling_references_dropped() {
    let model = ModelBuilder::new()
        .entity(BuildingEntity::new(1, Category::Storey).with_global_id(GUID_STOREY))
        .entity(BuildingEntity::new(2, Category::Element).with_global_id(GUID_ELEMENT))
        .contain(1, [2, 99])
        .build()
        .unwrap();

    let conversion = convert(&model, &options()).unwrap();
    let storey = conversion.graph.block("storey_1").unwrap();
    assert_eq!(storey.with_predicate("bot:containsElement").count(), 1);
    assert!(!conversion.to_turtle().contains("element_99"));
    assert_eq!(
        conversion.report.warnings,
        vec![DanglingReference::UnresolvedTarget {
            node: "storey_1".to_string(),
            predicate: "bot:containsElement",
            target: EntityId(99),
            expected: Category::Element,
        }]
    );
}

#[test]
fn test_interface_sides() {
    let model = ModelBuilder::new()
        .entity(BuildingEntity::new(1, Category::Space).with_global_id(GUID_SPACE))
        .entity(BuildingEntity::new(2, Category::Element).with_global_id(GUID_ELEMENT))
        .entity(BuildingEntity::new(3, Category::Interface).with_global_id(GUID_HOSTED))
        .boundary(3, Some(1), Some(2))
        .build()
        .unwrap();

    let conversion = convert(&model, &options()).unwrap();
    let turtle = conversion.to_turtle();
    assert!(turtle.contains("\tbot:adjacentElement inst:element_2 .\n"));
    assert!(turtle.contains("\tbot:interfaceOf inst:space_1, inst:element_2 .\n"));
}

#[test]
fn test_partial_interfaces() {
    let model = ModelBuilder::new()
        .entity(BuildingEntity::new(1, Category::Space).with_global_id(GUID_SPACE))
        .entity(BuildingEntity::new(2, Category::Element).with_global_id(GUID_ELEMENT))
        .entity(BuildingEntity::new(3, Category::Interface).with_global_id(GUID_STOREY))
        .entity(BuildingEntity::new(4, Category::Interface).with_global_id(GUID_HOSTED))
        .entity(BuildingEntity::new(5, Category::Interface).with_global_id(GUID_INTERFACE))
        .boundary(3, Some(1), None)
        .boundary(4, None, Some(2))
        .boundary(5, None, None)
        .build()
        .unwrap();

    let conversion = convert(&model, &options()).unwrap();
    let graph = &conversion.graph;
    assert!(conversion.report.warnings.is_empty());

    let space_side = graph.block("interface_3").unwrap();
    assert_eq!(space_side.with_predicate("bot:interfaceOf").count(), 1);
    let element_side = graph.block("interface_4").unwrap();
    assert_eq!(element_side.with_predicate("bot:interfaceOf").count(), 1);
    let sideless = graph.block("interface_5").unwrap();
    assert_eq!(sideless.with_predicate("bot:interfaceOf").count(), 0);

    // Adjacency needs both sides of a boundary
    let space = graph.block("space_1").unwrap();
    assert_eq!(space.with_predicate("bot:adjacentElement").count(), 0);

    let turtle = conversion.to_turtle();
    assert!(turtle.contains("\tbot:interfaceOf inst:space_1 .\n\ninst:interface_4\n"));
    assert!(turtle.contains("\tbot:interfaceOf inst:element_2 .\n\ninst:interface_5\n"));
    assert!(turtle.ends_with(
        "inst:interface_5\n\
         \ta bot:Interface ;\n\
         \tbot:hasGuid \"6bd123dd6eda5f18a834fa55b7c63e92\"^^xsd:string ;\n\
         \tprops:hasCompressedGuid \"1hqIFTRjfV6AWq_bMtnZwI\"^^xsd:string .\n\n"
    ));
}

#[test]
fn test_attribute_predicates_match_audit_parameters() {
    let model = ModelBuilder::new()
        .entity(
            BuildingEntity::new(1, Category::Space)
                .with_global_id(GUID_SPACE)
                .with_attribute_set(
                    AttributeSet::new("Dimensions")
                        .with("Area_M²", 24.0)
                        .with("Size [m]", 3.0)
                        .with("Height_Mm", 2700.0),
                ),
        )
        .build()
        .unwrap();

    let conversion = convert(&model, &options()).unwrap();
    let turtle = conversion.to_turtle();
    let rows = conversion.audit.rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].parameter, "Area_M²");
    assert_eq!(rows[0].unit, "m²");
    assert_eq!(rows[1].parameter, "Size[M]");

    // Names outside the prefixed-name grammar are written as full IRIs
    for row in &rows[..2] {
        let statement = format!("\t<{}{}> \"{}\"^^xsd:double", PROPS, row.parameter, row.value);
        assert!(turtle.contains(&statement), "missing {}", statement);
    }
    assert!(turtle.contains("\tprops:Height_Mm \"2700.0\"^^xsd:double .\n"));
    assert!(!turtle.contains('%'));
}

#[test]
fn test_json_fixture() {
    let model = InMemoryModel::open(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/small_house.json"
    ))
    .unwrap();

    let conversion = convert(&model, &options()).unwrap();
    let report = &conversion.report;
    assert_eq!(report.nodes.get(&Category::Site), Some(&1));
    assert_eq!(report.nodes.get(&Category::Element), Some(&2));
    assert_eq!(report.nodes.get(&Category::Zone), Some(&1));
    assert!(report.warnings.is_empty());

    let turtle = conversion.to_turtle();
    assert!(turtle.contains("\tbot:hasBuilding inst:building_2 .\n"));
    assert!(turtle.contains("\tbot:hostsElement inst:element_7 ;\n"));
    assert!(turtle.contains("\tprops:Gwp_Total_Kgco2Eq \"41.5\"^^xsd:double"));

    let gwp = conversion
        .audit
        .rows()
        .iter()
        .find(|r| r.parameter == "Gwp_Total_Kgco2Eq")
        .unwrap();
    assert_eq!(gwp.unit, "kgCO₂eq");
    assert_eq!(gwp.element_type, "IfcWall");
    assert_eq!(gwp.element_name, "Wall 01");
}

#[test]
fn test_write_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let ttl = dir.path().join("model.ttl");
    let csv = dir.path().join("model.csv");

    let conversion = convert(&small_model(), &options()).unwrap();
    conversion.write_turtle(&ttl).unwrap();
    assert!(conversion.audit.write_csv(&csv).unwrap());

    assert_eq!(std::fs::read_to_string(&ttl).unwrap(), conversion.to_turtle());
    let table = std::fs::read_to_string(&csv).unwrap();
    assert_eq!(
        table,
        "Element_ID,Element_Type,Element_Name,Parameter,Value,Data_Type,Unit\n\
         element_30,IfcWall,,Dpp_Dim_Height_Mm,200.0,double,mm\n"
    );
}
