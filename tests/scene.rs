mod tests {
    use myrtio_status_ring::Scene;

    #[test]
    fn test_scene_parse_now_playing() {
        assert_eq!(
            Scene::parse_from_str("now_playing"),
            Some(Scene::NowPlaying)
        );
    }

    #[test]
    fn test_scene_from_raw_waiting() {
        assert_eq!(Scene::from_raw(0), Some(Scene::Waiting));
    }

    #[test]
    fn test_scene_from_raw_now_playing() {
        assert_eq!(Scene::from_raw(7), Some(Scene::NowPlaying));
    }

    #[test]
    fn test_scene_from_raw_out_of_range() {
        assert_eq!(Scene::from_raw(8), None);
    }

    #[test]
    fn test_scene_as_str_volume() {
        assert_eq!(Scene::VolumeMeter.as_str(), "volume");
    }

    #[test]
    fn test_scene_parse_unknown() {
        assert_eq!(Scene::parse_from_str("rainbow"), None);
    }

    #[test]
    fn test_scene_ids_match_order() {
        for (id, scene) in Scene::ALL.iter().enumerate() {
            assert_eq!(Scene::from_raw(id as u8), Some(*scene));
            assert_eq!(Scene::parse_from_str(scene.as_str()), Some(*scene));
        }
    }
}
