//! Mock catalog and fixtures shared by pipeline tests.

use echobase_catalog::CatalogClient;
use echobase_shared::CatalogConfig;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub(crate) fn client_for(server: &MockServer) -> CatalogClient {
    let config = CatalogConfig::new(&format!("{}/api", server.uri()), 5).unwrap();
    CatalogClient::new(&config).unwrap()
}

pub(crate) async fn mount_search(server: &MockServer, collection: &str, term: &str, record: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/{collection}/")))
        .and(query_param("search", term))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "results": [record],
        })))
        .mount(server)
        .await;
}

fn person(server: &MockServer, id: u32, name: &str, height: &str, species: Vec<String>) -> Value {
    json!({
        "name": name,
        "height": height,
        "mass": "unknown",
        "hair_color": "n/a",
        "skin_color": "fair",
        "eye_color": "brown",
        "birth_year": "19BBY",
        "gender": "n/a",
        "homeworld": format!("{}/api/planets/1/", server.uri()),
        "films": [],
        "species": species,
        "vehicles": [],
        "url": format!("{}/api/people/{id}/", server.uri()),
    })
}

/// A mock catalog able to answer every lookup the enricher makes.
pub(crate) async fn mock_catalog() -> MockServer {
    let server = MockServer::start().await;
    let uri = server.uri();

    Mock::given(method("GET"))
        .and(path_regex(r"^/api/planets/\d+/$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Tatooine",
            "rotation_period": "23",
            "orbital_period": "304",
            "diameter": "10465",
            "climate": "arid",
            "gravity": "1 standard",
            "terrain": "desert",
            "surface_water": "1",
            "population": "200000",
            "residents": [],
            "url": format!("{uri}/api/planets/1/"),
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/species/2/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Droid",
            "classification": "artificial",
            "designation": "sentient",
            "average_height": "n/a",
            "skin_colors": "n/a",
            "hair_colors": "n/a",
            "eye_colors": "n/a",
            "average_lifespan": "indefinite",
            "language": "n/a",
            "url": format!("{uri}/api/species/2/"),
        })))
        .mount(&server)
        .await;

    mount_search(&server, "planets", "hoth", json!({
        "name": "Hoth",
        "rotation_period": "23",
        "orbital_period": "549",
        "diameter": "7200",
        "climate": "frozen",
        "gravity": "1.1 standard",
        "terrain": "tundra, ice caves, mountain ranges",
        "surface_water": "100",
        "population": "unknown",
        "residents": [],
        "url": format!("{uri}/api/planets/4/"),
    }))
    .await;
    mount_search(&server, "vehicles", "snowspeeder", json!({
        "name": "Snowspeeder",
        "model": "t-47 airspeeder",
        "vehicle_class": "airspeeder",
        "manufacturer": "Incom corporation",
        "length": "4.5",
        "max_atmosphering_speed": "650",
        "crew": "2",
        "passengers": "0",
        "cargo_capacity": "10",
        "consumables": "none",
        "url": format!("{uri}/api/vehicles/14/"),
    }))
    .await;
    mount_search(&server, "starships", "T-65", json!({
        "name": "X-wing",
        "model": "T-65 X-wing",
        "manufacturer": "Incom Corporation",
        "length": "12.5",
        "max_atmosphering_speed": "1050",
        "crew": "1",
        "passengers": "0",
        "cargo_capacity": "110",
        "consumables": "1 week",
        "hyperdrive_rating": "1.0",
        "MGLT": "100",
        "starship_class": "Starfighter",
        "pilots": [],
        "url": format!("{uri}/api/starships/12/"),
    }))
    .await;
    mount_search(&server, "starships", "GR-75", json!({
        "name": "Rebel transport",
        "model": "GR-75 medium transport",
        "manufacturer": "Gallofree Yards, Inc.",
        "length": "90",
        "max_atmosphering_speed": "650",
        "crew": "6",
        "passengers": "90",
        "cargo_capacity": "19000000",
        "consumables": "6 months",
        "hyperdrive_rating": "4.0",
        "MGLT": "20",
        "starship_class": "Medium transport",
        "url": format!("{uri}/api/starships/17/"),
    }))
    .await;
    mount_search(&server, "starships", "millennium", json!({
        "name": "Millennium Falcon",
        "model": "YT-1300 light freighter",
        "manufacturer": "Corellian Engineering Corporation",
        "length": "34.37",
        "max_atmosphering_speed": "1050",
        "crew": "4",
        "passengers": "6",
        "cargo_capacity": "100000",
        "consumables": "2 months",
        "hyperdrive_rating": "0.5",
        "MGLT": "75",
        "starship_class": "Light freighter",
        "url": format!("{uri}/api/starships/10/"),
    }))
    .await;

    let droid = vec![format!("{uri}/api/species/2/")];
    for (term, id, name, height, species) in [
        ("han solo", 14, "Han Solo", "180", vec![]),
        ("Chewbacca", 13, "Chewbacca", "228", vec![]),
        ("leia", 5, "Leia Organa", "150", vec![]),
        ("c-3po", 2, "C-3PO", "167", droid.clone()),
        ("luke skywalker", 1, "Luke Skywalker", "172", vec![]),
        ("r2-d2", 3, "R2-D2", "96", droid.clone()),
        ("wedge antilles", 18, "Wedge Antilles", "170", vec![]),
        ("r5-d4", 8, "R5-D4", "97", droid),
    ] {
        mount_search(&server, "people", term, person(&server, id, name, height, species)).await;
    }

    server
}

pub(crate) fn echo_base_fixture(server: &MockServer) -> Value {
    let text = std::fs::read_to_string("../../../fixtures/json/echo_base.fixture.json")
        .expect("echo base fixture");
    let text = text.replace("{{CATALOG}}", &format!("{}/api", server.uri()));
    serde_json::from_str(&text).expect("fixture parses")
}
