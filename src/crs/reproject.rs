use super::Crs;
use crate::error::ReprojectionError;
use crate::geometry::PointZ;

use proj4rs::{transform::transform, Proj};

/// Brings coordinates from one crs into another, in place.
/// Elevations are left untouched.
pub trait Reprojector {
    fn reproject(
        &self,
        points: &mut [PointZ],
        from: &Crs,
        to: &Crs,
    ) -> std::result::Result<(), ReprojectionError>;
}

/// Reprojection through proj4rs, geographic systems are in degrees on both sides
#[derive(Clone, Copy, Debug, Default)]
pub struct ProjReprojector;

impl ProjReprojector {
    fn proj(code: u16) -> std::result::Result<Proj, ReprojectionError> {
        if crs_definitions::from_code(code).is_none() {
            return Err(ReprojectionError::UnknownEpsg(code));
        }
        Ok(Proj::from_epsg_code(code)?)
    }
}

impl Reprojector for ProjReprojector {
    fn reproject(
        &self,
        points: &mut [PointZ],
        from: &Crs,
        to: &Crs,
    ) -> std::result::Result<(), ReprojectionError> {
        let (from_code, to_code) = match (from, to) {
            _ if from == to => return Ok(()),
            (Crs::Epsg(f), Crs::Epsg(t)) => (*f, *t),
            _ => {
                return Err(ReprojectionError::Unreconcilable {
                    from: from.to_string(),
                    to: to.to_string(),
                })
            }
        };

        let from_proj = Self::proj(from_code)?;
        let to_proj = Self::proj(to_code)?;

        // proj4rs uses radians for geographic systems, conversion needed
        let mut coords: Vec<(f64, f64)> = if from_proj.is_latlong() {
            points
                .iter()
                .map(|p| (p.x.to_radians(), p.y.to_radians()))
                .collect()
        } else {
            points.iter().map(|p| (p.x, p.y)).collect()
        };

        transform(&from_proj, &to_proj, coords.as_mut_slice())?;

        let to_degrees = to_proj.is_latlong();
        for (p, c) in points.iter_mut().zip(coords) {
            if to_degrees {
                p.x = c.0.to_degrees();
                p.y = c.1.to_degrees();
            } else {
                p.x = c.0;
                p.y = c.1;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_crs_is_a_no_op() -> std::result::Result<(), ReprojectionError> {
        let mut points = vec![PointZ::new(10.5, 60.2, 3.)];
        ProjReprojector.reproject(&mut points, &Crs::Epsg(4326), &Crs::Epsg(4326))?;
        assert_eq!(points[0], PointZ::new(10.5, 60.2, 3.));

        ProjReprojector.reproject(&mut points, &Crs::Unknown, &Crs::Unknown)?;
        assert_eq!(points[0], PointZ::new(10.5, 60.2, 3.));
        Ok(())
    }

    #[test]
    fn wgs84_to_utm_and_back() -> std::result::Result<(), ReprojectionError> {
        let original = PointZ::new(15., 60., 120.);
        let mut points = vec![original];

        ProjReprojector.reproject(&mut points, &Crs::Epsg(4326), &Crs::Epsg(32633))?;
        // 15 degrees east is the central meridian of UTM zone 33
        assert!((points[0].x - 500_000.).abs() < 1.);
        assert!(points[0].y > 6_000_000.);
        assert_eq!(points[0].z, Some(120.));

        ProjReprojector.reproject(&mut points, &Crs::Epsg(32633), &Crs::Epsg(4326))?;
        assert!((points[0].x - original.x).abs() < 1e-6);
        assert!((points[0].y - original.y).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn unknown_against_known_fails() {
        let mut points = vec![PointZ::new_2d(0., 0.)];
        let res = ProjReprojector.reproject(&mut points, &Crs::Unknown, &Crs::Epsg(4326));
        assert!(matches!(res, Err(ReprojectionError::Unreconcilable { .. })));
    }
}
