//! Static spaceship catalog. Records are immutable and live for the whole program.

use engine_core::{hex_to_linear, ColorError};
use glam::Vec3;

/// Neutral gray used when a record's color fails to parse.
pub const FALLBACK_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 1.0];

/// One (key, value) row of a ship's technical specs. Keys are camelCase or lowercase words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecEntry {
    pub key: &'static str,
    pub value: &'static str,
}

const fn spec(key: &'static str, value: &'static str) -> SpecEntry {
    SpecEntry { key, value }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceshipRecord {
    pub id: u32,
    pub name: &'static str,
    pub position: Vec3,
    /// Euler angles in radians, XYZ order.
    pub rotation: Vec3,
    pub scale: f32,
    /// `#rrggbb`
    pub color: &'static str,
    /// Display order is slice order.
    pub specs: &'static [SpecEntry],
    pub description: &'static str,
    pub history: &'static str,
}

impl SpaceshipRecord {
    /// Linear RGBA of the record's hull color.
    pub fn base_color(&self) -> Result<[f32; 4], ColorError> {
        hex_to_linear(self.color)
    }

    /// `base_color`, or gray with a warning when the record's color is malformed.
    pub fn base_color_or_fallback(&self) -> [f32; 4] {
        self.base_color().unwrap_or_else(|e| {
            log::warn!("Ship {} ({}) has bad color {:?}: {}", self.id, self.name, self.color, e);
            FALLBACK_COLOR
        })
    }
}

static CATALOG: [SpaceshipRecord; 5] = [
    SpaceshipRecord {
        id: 1,
        name: "Interceptor Estelar",
        position: Vec3::new(-8.0, 2.0, -5.0),
        rotation: Vec3::new(0.0, 0.5, 0.0),
        scale: 1.0,
        color: "#4a90e2",
        specs: &[
            spec("velocidad", "Mach 15"),
            spec("armamento", "Cañones láser duales"),
            spec("tripulación", "1 piloto"),
            spec("alcance", "500 años luz"),
        ],
        description: "Nave de combate ligera diseñada para misiones de reconocimiento y combate rápido. \
                      Su diseño aerodinámico permite maniobras extremas en el espacio.",
        history: "Desarrollada por la Federación Galáctica en el año 2387, esta nave ha sido el pilar \
                  de las flotas de exploración durante décadas.",
    },
    SpaceshipRecord {
        id: 2,
        name: "Crucero de Batalla",
        position: Vec3::new(0.0, -2.0, 0.0),
        rotation: Vec3::new(0.0, -0.3, 0.0),
        scale: 1.5,
        color: "#e74c3c",
        specs: &[
            spec("velocidad", "Mach 8"),
            spec("armamento", "Torpedos cuánticos, Escudos deflectores"),
            spec("tripulación", "150 personas"),
            spec("alcance", "2000 años luz"),
        ],
        description: "Nave capital diseñada para operaciones de largo alcance y combate pesado. \
                      Equipada con la tecnología más avanzada disponible.",
        history: "Construida en los astilleros de Titan, representa el pináculo de la ingeniería \
                  espacial humana del siglo XXIV.",
    },
    SpaceshipRecord {
        id: 3,
        name: "Explorador Científico",
        position: Vec3::new(8.0, 1.0, -3.0),
        rotation: Vec3::new(0.0, -0.8, 0.0),
        scale: 0.8,
        color: "#2ecc71",
        specs: &[
            spec("velocidad", "Mach 12"),
            spec("armamento", "Sistemas defensivos básicos"),
            spec("tripulación", "25 científicos"),
            spec("alcance", "5000 años luz"),
        ],
        description: "Nave especializada en exploración y investigación científica. Equipada con \
                      laboratorios avanzados y sensores de largo alcance.",
        history: "Diseñada por la Academia de Ciencias Interplanetarias para misiones de exploración \
                  del espacio profundo y contacto con nuevas civilizaciones.",
    },
    SpaceshipRecord {
        id: 4,
        name: "Transporte Pesado",
        position: Vec3::new(-5.0, -3.0, 8.0),
        rotation: Vec3::new(0.0, 1.2, 0.0),
        scale: 2.0,
        color: "#f39c12",
        specs: &[
            spec("velocidad", "Mach 5"),
            spec("armamento", "Torretas defensivas automatizadas"),
            spec("tripulación", "50 personas"),
            spec("alcance", "1000 años luz"),
        ],
        description: "Nave de carga masiva diseñada para transportar recursos y suministros entre \
                      colonias. Su gran capacidad de carga la hace indispensable para el comercio \
                      intergaláctico.",
        history: "Utilizada extensivamente durante la Gran Expansión Colonial, estas naves fueron \
                  fundamentales para establecer las rutas comerciales actuales.",
    },
    SpaceshipRecord {
        id: 5,
        name: "Caza Stealth",
        position: Vec3::new(6.0, 4.0, 5.0),
        rotation: Vec3::new(0.0, -1.5, 0.0),
        scale: 0.6,
        color: "#9b59b6",
        specs: &[
            spec("velocidad", "Mach 20"),
            spec("armamento", "Misiles de plasma, Camuflaje óptico"),
            spec("tripulación", "1 piloto"),
            spec("alcance", "300 años luz"),
        ],
        description: "Nave furtiva de última generación con capacidades de camuflaje avanzadas. \
                      Diseñada para operaciones encubiertas y misiones especiales.",
        history: "Proyecto clasificado desarrollado por la División de Operaciones Especiales. Solo \
                  unos pocos pilotos élite están autorizados a pilotarla.",
    },
];

/// All catalog records in display order.
pub fn catalog() -> &'static [SpaceshipRecord] {
    &CATALOG
}

pub fn find(id: u32) -> Option<&'static SpaceshipRecord> {
    CATALOG.iter().find(|r| r.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn five_records() {
        assert_eq!(catalog().len(), 5);
    }

    #[test]
    fn ids_and_names_unique() {
        let ids: HashSet<_> = catalog().iter().map(|r| r.id).collect();
        let names: HashSet<_> = catalog().iter().map(|r| r.name).collect();
        assert_eq!(ids.len(), catalog().len());
        assert_eq!(names.len(), catalog().len());
    }

    #[test]
    fn scales_positive_and_specs_present() {
        for r in catalog() {
            assert!(r.scale > 0.0, "{}", r.name);
            assert_eq!(r.specs.len(), 4, "{}", r.name);
        }
    }

    #[test]
    fn colors_parse() {
        for r in catalog() {
            let c = r.base_color().unwrap();
            assert_eq!(c[3], 1.0);
        }
    }

    #[test]
    fn find_by_id() {
        assert_eq!(find(2).map(|r| r.name), Some("Crucero de Batalla"));
        assert_eq!(find(5).map(|r| r.scale), Some(0.6));
        assert!(find(0).is_none());
        assert!(find(6).is_none());
    }

    #[test]
    fn descriptions_join_without_gaps() {
        let r = find(1).unwrap();
        assert!(r.description.contains("rápido. Su diseño"));
        assert!(!r.description.contains("  "));
    }

    #[test]
    fn bad_color_falls_back_to_gray() {
        let mut r = *find(1).unwrap();
        r.color = "blue";
        assert!(r.base_color().is_err());
        assert_eq!(r.base_color_or_fallback(), FALLBACK_COLOR);
    }
}
